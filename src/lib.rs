//! ZigZag swing-point detection for Rust.
//!
//! Finds alternating swing highs and lows in a series of price bars. A
//! swing extends while price keeps making new extremes and reverses once a
//! bar breaks the previous bar by more than a fractional threshold.
//!
//! Two entry points share one state machine ([`SwingDetector`]):
//!
//! - [`detect`] scans a whole slice of bars and returns [`Swings`].
//! - [`ZigZag`] is a streaming indicator fed one bar at a time, with live
//!   repaint support. It exposes [`new`](ZigZag::new),
//!   [`compute`](ZigZag::compute), and [`value`](ZigZag::value) as inherent
//!   methods, no trait import needed. Import [`Indicator`] only for generic
//!   code.
//!
//! Bars come in through the [`Ohlcv`] trait. [`validate_bars`] and the
//! [`BarSource`] seam keep malformed data and retrieval failures out of
//! detection, which itself never fails.

mod detector;
mod error;
mod indicator;
mod ohlcv;
mod source;
mod swing;
mod validate;
mod zigzag;

pub use crate::error::{DataRetrievalError, Error, MalformedBarError, MalformedReason, Result};
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::ohlcv::{Bar, Ohlcv, Price, Timestamp};
pub use crate::swing::{Direction, SwingKind, SwingPoint, Swings};

pub use crate::detector::{SwingDetector, detect};
pub use crate::source::{BarRequest, BarSource, CsvBarSource, Interval, Kline, fetch_and_detect};
pub use crate::validate::validate_bars;
pub use crate::zigzag::{Threshold, ZigZag, ZigZagConfig, ZigZagConfigBuilder};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, kline: &impl Ohlcv) -> Option<$output> {
                <Self as Indicator>::compute(self, kline)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }
        }
    };
}

impl_indicator_methods!(ZigZag, ZigZagConfig, SwingPoint);

#[cfg(test)]
mod test_util;
