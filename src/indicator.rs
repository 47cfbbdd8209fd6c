use crate::Ohlcv;

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Configuration for a streaming [`Indicator`].
///
/// Configs are value types: cheap to clone, compare, and hash, so they can
/// key a cache of running indicators.
pub trait IndicatorConfig: Sized + PartialEq + Eq + Hash + Display + Debug {
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder with no parameters set.
    fn builder() -> Self::Builder;
}

/// Builder for an [`IndicatorConfig`].
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Builds the config. Panics if required fields are missing.
    #[must_use]
    fn build(self) -> Config;
}

/// A streaming indicator.
///
/// Indicators keep internal state and update incrementally on each call to
/// [`compute`](Indicator::compute). Output is `None` until the input has
/// produced something to report.
///
/// # Example
///
/// ```
/// use quantedge_zigzag::{Bar, Indicator, SwingKind, Threshold, ZigZag, ZigZagConfig};
///
/// let mut zigzag = ZigZag::new(ZigZagConfig::new(Threshold::from_percent(5.0)));
///
/// assert_eq!(zigzag.compute(&Bar::new(10.0, 5.0).at(1)), None);
/// assert_eq!(zigzag.compute(&Bar::new(10.0, 5.0).at(2)), None);
///
/// let point = zigzag.compute(&Bar::new(11.0, 6.0).at(3)).unwrap();
/// assert_eq!(point.kind(), SwingKind::High);
/// assert_eq!(point.index(), 2);
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Computed output type.
    type Output: Send + Sync + Display + Debug;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// Feeds a bar and returns the updated value, or `None` if there is
    /// nothing to report yet.
    fn compute(&mut self, kline: &impl Ohlcv) -> Option<Self::Output>;

    /// Returns the last computed value without advancing state.
    ///
    /// This is a cached field read, O(1) with no computation.
    fn value(&self) -> Option<Self::Output>;
}
