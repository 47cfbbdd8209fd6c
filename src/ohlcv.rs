/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Bar open timestamp or sequence number.
///
/// Only the streaming [`ZigZag`](crate::ZigZag) reads it, to tell a new bar
/// from a repaint of the current one.
pub type Timestamp = u64;

/// Price bar as seen by swing detection.
///
/// Implement this on your own kline/candle type to avoid per-bar
/// conversion. Detection reads [`high`](Ohlcv::high) and [`low`](Ohlcv::low)
/// only; nothing checks that `low <= high` (see
/// [`validate_bars`](crate::validate_bars)).
///
/// # Example
///
/// ```
/// use quantedge_zigzag::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     h: f64, l: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn open_time(&self) -> Timestamp { self.ts }
/// }
/// ```
pub trait Ohlcv {
    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Bar open timestamp or sequence number.
    ///
    /// Consecutive [`ZigZag::compute`](crate::ZigZag::compute) calls with the
    /// same value repaint the current bar; a new value advances to the next
    /// bar. Values must be non-decreasing between calls.
    fn open_time(&self) -> Timestamp;
}

/// Minimal high/low bar.
///
/// ```
/// use quantedge_zigzag::{Bar, Ohlcv};
///
/// let bar = Bar::new(12.0, 7.0).at(3);
/// assert_eq!(bar.high(), 12.0);
/// assert_eq!(bar.open_time(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bar {
    high: Price,
    low: Price,
    open_time: Timestamp,
}

impl Bar {
    /// Bar with the given extremes and `open_time` 0.
    #[must_use]
    pub const fn new(high: Price, low: Price) -> Self {
        Self {
            high,
            low,
            open_time: 0,
        }
    }

    /// Same bar, stamped with `open_time`.
    #[must_use]
    pub const fn at(mut self, open_time: Timestamp) -> Self {
        self.open_time = open_time;
        self
    }

    pub(crate) fn of(ohlcv: &impl Ohlcv) -> Self {
        Self::new(ohlcv.high(), ohlcv.low()).at(ohlcv.open_time())
    }
}

impl Ohlcv for Bar {
    #[inline]
    fn high(&self) -> Price {
        self.high
    }

    #[inline]
    fn low(&self) -> Price {
        self.low
    }

    #[inline]
    fn open_time(&self) -> Timestamp {
        self.open_time
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults_open_time_to_zero() {
        assert_eq!(Bar::new(2.0, 1.0).open_time(), 0);
    }

    #[test]
    fn of_copies_high_low_and_time() {
        let src = Bar::new(30.0, 5.0).at(7);
        let copy = Bar::of(&src);
        assert_eq!(copy.high(), 30.0);
        assert_eq!(copy.low(), 5.0);
        assert_eq!(copy.open_time(), 7);
    }
}
