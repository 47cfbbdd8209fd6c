use std::fmt::Display;

use crate::Price;

/// Which extreme a [`SwingPoint`] marks.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum SwingKind {
    /// Local maximum, taken from the bar's high.
    High,
    /// Local minimum, taken from the bar's low.
    Low,
}

impl Display for SwingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Active swing phase of a detection run.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum Direction {
    /// No bar has made a higher high or a lower low yet.
    #[default]
    Undetermined,
    /// Moving toward a high; the last high is still refinable.
    Rising,
    /// Moving toward a low; the last low is still refinable.
    Falling,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A detected turning point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingPoint {
    index: usize,
    price: Price,
    kind: SwingKind,
}

impl SwingPoint {
    #[must_use]
    pub const fn new(index: usize, price: Price, kind: SwingKind) -> Self {
        Self { index, price, kind }
    }

    /// Index of the bar where the extreme occurred.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The bar's high for [`SwingKind::High`], its low for [`SwingKind::Low`].
    #[inline]
    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> SwingKind {
        self.kind
    }
}

impl Display for SwingPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({} @ {})", self.kind, self.price, self.index)
    }
}

/// Result of a detection run: highs and lows as two index-ordered sequences.
///
/// Consecutive points of the [`merged`](Swings::merged) sequence alternate
/// kind. The last point of the active direction may still be refined by
/// later bars when the run is continued (see [`ZigZag`](crate::ZigZag)).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Swings {
    pub(crate) highs: Vec<SwingPoint>,
    pub(crate) lows: Vec<SwingPoint>,
}

impl Swings {
    #[inline]
    #[must_use]
    pub fn highs(&self) -> &[SwingPoint] {
        &self.highs
    }

    #[inline]
    #[must_use]
    pub fn lows(&self) -> &[SwingPoint] {
        &self.lows
    }

    #[inline]
    #[must_use]
    pub fn last_high(&self) -> Option<&SwingPoint> {
        self.highs.last()
    }

    #[inline]
    #[must_use]
    pub fn last_low(&self) -> Option<&SwingPoint> {
        self.lows.last()
    }

    /// Most recent low that precedes the last high.
    ///
    /// Together with [`last_high`](Swings::last_high) this is the last
    /// completed low-to-high leg.
    #[must_use]
    pub fn low_before_last_high(&self) -> Option<&SwingPoint> {
        let high = self.last_high()?;
        self.lows.iter().rev().find(|low| low.index < high.index)
    }

    /// Total number of points.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.highs.len() + self.lows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.highs.is_empty() && self.lows.is_empty()
    }

    /// Highs and lows interleaved by bar index.
    #[must_use]
    pub fn merged(&self) -> Vec<SwingPoint> {
        let mut merged = Vec::with_capacity(self.len());
        let (mut highs, mut lows) = (self.highs.iter().peekable(), self.lows.iter().peekable());

        loop {
            let next = match (highs.peek(), lows.peek()) {
                (Some(h), Some(l)) if h.index < l.index => highs.next(),
                (_, Some(_)) => lows.next(),
                (Some(_), None) => highs.next(),
                (None, None) => break,
            };
            merged.extend(next.copied());
        }

        merged
    }

    /// `(highs, lows)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<SwingPoint>, Vec<SwingPoint>) {
        (self.highs, self.lows)
    }
}
