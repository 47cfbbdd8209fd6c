use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

use crate::{
    Bar, Direction, Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, SwingDetector,
    SwingPoint, Swings, detector::Checkpoint,
};

/// Fractional retracement that confirms a swing reversal.
///
/// Wraps a finite, non-negative `f64`: `0.01` means a bar must break the
/// previous bar's low (or high) by more than 1% to reverse the swing.
/// There is no default; every caller picks its own sensitivity.
///
/// Implements `Eq` and `Hash` via bit-level comparison, which is safe because
/// NaN is rejected at construction.
#[derive(Clone, Copy, Debug)]
pub struct Threshold(f64);

impl Threshold {
    /// Creates a threshold from a fraction.
    ///
    /// # Panics
    ///
    /// Panics if `value` is NaN, infinite, or negative.
    #[must_use]
    pub fn new(value: f64) -> Self {
        assert!(!value.is_nan(), "threshold must not be NaN");
        assert!(value.is_finite(), "threshold must be finite");
        assert!(value >= 0.0, "threshold must not be negative");
        Self(value)
    }

    /// Creates a threshold from a percentage: `from_percent(1.0)` is `0.01`.
    ///
    /// # Panics
    ///
    /// Same conditions as [`new`](Self::new).
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        Self::new(percent / 100.0)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Threshold {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Threshold {}

impl Hash for Threshold {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration for the [`ZigZag`] indicator.
///
/// # Example
///
/// ```
/// use quantedge_zigzag::{IndicatorConfig, IndicatorConfigBuilder, Threshold, ZigZagConfig};
///
/// let config = ZigZagConfig::builder()
///     .threshold(Threshold::from_percent(1.0))
///     .build();
///
/// assert_eq!(config.threshold().value(), 0.01);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct ZigZagConfig {
    threshold: Threshold,
}

impl IndicatorConfig for ZigZagConfig {
    type Builder = ZigZagConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        ZigZagConfigBuilder::new()
    }
}

impl ZigZagConfig {
    /// Config with the given reversal threshold.
    #[must_use]
    pub fn new(threshold: Threshold) -> Self {
        Self::builder().threshold(threshold).build()
    }

    /// Reversal threshold.
    #[inline]
    #[must_use]
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }
}

impl Display for ZigZagConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ZigZagConfig({})", self.threshold)
    }
}

/// Builder for [`ZigZagConfig`].
///
/// Threshold must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct ZigZagConfigBuilder {
    threshold: Option<Threshold>,
}

impl ZigZagConfigBuilder {
    fn new() -> Self {
        Self { threshold: None }
    }

    #[inline]
    #[must_use]
    pub fn threshold(mut self, threshold: Threshold) -> Self {
        self.threshold.replace(threshold);
        self
    }
}

impl IndicatorConfigBuilder<ZigZagConfig> for ZigZagConfigBuilder {
    #[inline]
    fn build(self) -> ZigZagConfig {
        ZigZagConfig {
            threshold: self.threshold.expect("threshold is required"),
        }
    }
}

/// Streaming ZigZag swing detector.
///
/// Feeds bars one at a time through a [`SwingDetector`]. Bar indices count
/// distinct `open_time` values, so a series fed bar by bar ends with the same
/// [`swings`](ZigZag::swings) as [`detect`](crate::detect) over the whole
/// slice.
///
/// Each [`compute`](ZigZag::compute) returns the active, still refinable
/// swing point: the last high while rising, the last low while falling.
/// It is `None` until the first higher high or lower low.
///
/// Supports live repainting: feeding a bar with the same `open_time` undoes
/// whatever the previous version of that bar did, then applies the new one.
///
/// # Example
///
/// ```
/// use quantedge_zigzag::{Bar, SwingKind, Threshold, ZigZag, ZigZagConfig};
///
/// let mut zigzag = ZigZag::new(ZigZagConfig::new(Threshold::new(0.1)));
///
/// zigzag.compute(&Bar::new(10.0, 5.0).at(1));
/// zigzag.compute(&Bar::new(11.0, 6.0).at(2));
/// zigzag.compute(&Bar::new(12.0, 7.0).at(3));
///
/// // Still forming: 9/4 repaints into 12.5/8, a higher high
/// zigzag.compute(&Bar::new(9.0, 4.0).at(4));
/// let point = zigzag.compute(&Bar::new(12.5, 8.0).at(4)).unwrap();
///
/// assert_eq!(point.kind(), SwingKind::High);
/// assert_eq!(point.price(), 12.5);
/// assert!(zigzag.swings().lows().is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct ZigZag {
    config: ZigZagConfig,
    detector: SwingDetector,
    prev: Option<Bar>,
    current: Option<Bar>,
    index: usize,
    checkpoint: Option<Checkpoint>,
    value: Option<SwingPoint>,
}

impl Indicator for ZigZag {
    type Config = ZigZagConfig;
    type Output = SwingPoint;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            detector: SwingDetector::new(config.threshold.value()),
            prev: None,
            current: None,
            index: 0,
            checkpoint: None,
            value: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Self::Output> {
        let bar = Bar::of(ohlcv);
        debug_assert!(
            self.current.is_none_or(|c| c.open_time() <= bar.open_time()),
            "open_time must be non-decreasing: last={}, got={}",
            self.current.map_or(0, |c| c.open_time()),
            bar.open_time(),
        );

        match self.current {
            Some(current) if current.open_time() == bar.open_time() => {
                if let Some(checkpoint) = &self.checkpoint {
                    self.detector.rollback(checkpoint);
                }
            }
            Some(current) => {
                self.prev = Some(current);
                self.index += 1;
            }
            None => {}
        }
        self.current = Some(bar);

        if let Some(prev) = &self.prev {
            self.checkpoint = Some(self.detector.checkpoint());
            self.detector.step(self.index, prev, &bar);
        }

        self.value = self.detector.active_point();
        self.value
    }

    #[inline]
    fn value(&self) -> Option<Self::Output> {
        self.value
    }
}

impl ZigZag {
    /// Points found so far, including the still refinable active one.
    #[inline]
    #[must_use]
    pub fn swings(&self) -> &Swings {
        self.detector.swings()
    }

    /// Currently active swing direction.
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.detector.direction()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> ZigZagConfig {
        self.config
    }

    #[must_use]
    pub fn into_swings(self) -> Swings {
        self.detector.into_swings()
    }
}

impl Display for ZigZag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ZigZag({})", self.config.threshold)
    }
}
