#![allow(dead_code)]

use quantedge_zigzag::{Kline, SwingKind, SwingPoint};
use serde::{Deserialize, de::DeserializeOwned};

pub const DATA_DIR: &str = "tests/fixtures/data";

const OHLCV_PATH: &str = "tests/fixtures/data/btcusdt-1h.csv";

/// Expected swing point, as exported next to the OHLCV fixture.
#[derive(Debug, Deserialize)]
pub struct RefSwing {
    pub index: usize,
    pub open_time: u64,
    pub price: f64,
    pub kind: RefKind,
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum RefKind {
    High,
    Low,
}

impl From<RefKind> for SwingKind {
    fn from(kind: RefKind) -> Self {
        match kind {
            RefKind::High => SwingKind::High,
            RefKind::Low => SwingKind::Low,
        }
    }
}

/// Load reference klines (Binance BTCUSDT 1h layout).
pub fn load_reference_ohlcvs() -> Vec<Kline> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// Load expected swing points, ordered by index.
pub fn load_ref_swings(path: &str) -> Vec<RefSwing> {
    load_records(path, "invalid swing reference record")
}

/// Assert a detected point matches the reference one.
pub fn assert_swing(actual: &SwingPoint, expected: &RefSwing, context: &str) {
    assert_eq!(actual.index(), expected.index, "{context}: index");
    assert_eq!(actual.kind(), SwingKind::from(expected.kind), "{context}: kind");

    let diff = (actual.price() - expected.price).abs();
    assert!(
        diff <= 1e-9,
        "{context}: expected {:.2}, got {:.2}, diff {diff:.2e}",
        expected.price,
        actual.price()
    );
}

/// Creates perturbed versions of a bar to simulate live repaints.
///
/// Returns 2 intermediate bars (narrow range first, then an overshoot on
/// both sides) followed by the original bar. All share the same `open_time`.
pub fn repaint_sequence(bar: &Kline) -> Vec<Kline> {
    vec![
        // First tick: only open is known
        Kline {
            high: bar.open * 1.0005,
            low: bar.open * 0.9995,
            close: bar.open,
            ..*bar
        },
        // Spike: wider than the final bar on both sides
        Kline {
            high: bar.high * 1.02,
            low: bar.low * 0.98,
            ..*bar
        },
        // Final: real values
        *bar,
    ]
}

/// Assert alternation and index ordering over a merged swing sequence.
pub fn assert_well_formed(points: &[SwingPoint], context: &str) {
    for pair in points.windows(2) {
        assert_ne!(
            pair[0].kind(),
            pair[1].kind(),
            "{context}: consecutive {} points at {} and {}",
            pair[0].kind(),
            pair[0].index(),
            pair[1].index()
        );
        assert!(
            pair[0].index() < pair[1].index(),
            "{context}: index went from {} to {}",
            pair[0].index(),
            pair[1].index()
        );
    }
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
