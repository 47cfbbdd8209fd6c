// src/test_util.rs

use crate::{Bar, Price, SwingKind, SwingPoint};

/// Zips highs and lows into bars stamped with their position.
pub fn bars(highs: &[Price], lows: &[Price]) -> Vec<Bar> {
    assert_eq!(highs.len(), lows.len(), "highs and lows differ in length");

    highs
        .iter()
        .zip(lows)
        .zip(0..)
        .map(|((&h, &l), t)| Bar::new(h, l).at(t))
        .collect()
}

pub fn high(index: usize, price: Price) -> SwingPoint {
    SwingPoint::new(index, price, SwingKind::High)
}

pub fn low(index: usize, price: Price) -> SwingPoint {
    SwingPoint::new(index, price, SwingKind::Low)
}
