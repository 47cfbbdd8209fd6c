use tracing::{debug, trace};

use crate::{Direction, Ohlcv, Price, SwingKind, SwingPoint, Swings};

/// Detects swing highs and lows over a whole series.
///
/// Walks the bars once, starting at bar 1 (bar 0 only serves as the first
/// "previous" bar). See [`SwingDetector`] for the rules applied to each bar.
///
/// `threshold` is the fractional retracement that confirms a reversal
/// (`0.01` = 1%). It is measured against the previous bar's low (or high),
/// not against the active swing's extreme.
///
/// Never fails and never panics. Bars with `low > high` or `NaN` prices yield
/// unspecified points; reject them first with
/// [`validate_bars`](crate::validate_bars).
///
/// # Example
///
/// ```
/// use quantedge_zigzag::{Bar, SwingKind, SwingPoint, detect};
///
/// let bars = [
///     Bar::new(10.0, 5.0),
///     Bar::new(11.0, 6.0),
///     Bar::new(12.0, 7.0),
///     Bar::new(9.0, 4.0),
/// ];
///
/// let swings = detect(&bars, 0.1);
///
/// assert_eq!(swings.highs(), [SwingPoint::new(2, 12.0, SwingKind::High)]);
/// assert_eq!(swings.lows(), [SwingPoint::new(3, 4.0, SwingKind::Low)]);
/// ```
#[must_use]
pub fn detect<B: Ohlcv>(bars: &[B], threshold: f64) -> Swings {
    let mut detector = SwingDetector::new(threshold);

    for (index, pair) in bars.windows(2).enumerate() {
        detector.step(index + 1, &pair[0], &pair[1]);
    }

    let swings = detector.into_swings();
    debug!(
        bars = bars.len(),
        threshold,
        highs = swings.highs.len(),
        lows = swings.lows.len(),
        "zigzag detection finished"
    );

    swings
}

/// ZigZag state machine.
///
/// Holds the active [`Direction`] and the points found so far. Each
/// [`step`](SwingDetector::step) looks at one bar and the bar before it:
///
/// - **Undetermined**: a higher high starts a rising swing, otherwise a
///   lower low starts a falling one. The rising check wins ties.
/// - **Rising**: a high above the last swing high moves that point to the
///   current bar. Otherwise a low more than `threshold` below the previous
///   bar's low confirms a reversal and opens a new low.
/// - **Falling**: mirror image.
///
/// Moving the active point never changes its kind and never adds a point.
#[derive(Clone, Debug)]
pub struct SwingDetector {
    threshold: f64,
    direction: Direction,
    swings: Swings,
}

impl SwingDetector {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            direction: Direction::Undetermined,
            swings: Swings::default(),
        }
    }

    /// Advances the machine with bar `index`, given the bar before it.
    ///
    /// Callers must pass indices above every point found so far.
    pub fn step(&mut self, index: usize, prev: &impl Ohlcv, cur: &impl Ohlcv) {
        debug_assert!(
            self.last_index().is_none_or(|last| last < index),
            "index must be increasing: last={}, got={index}",
            self.last_index().unwrap_or(0),
        );

        let (prev_high, prev_low) = (prev.high(), prev.low());
        let (cur_high, cur_low) = (cur.high(), cur.low());

        match self.direction {
            Direction::Undetermined => {
                if cur_high > prev_high {
                    self.open(Direction::Rising, index, cur_high);
                } else if cur_low < prev_low {
                    self.open(Direction::Falling, index, cur_low);
                }
            }
            Direction::Rising => {
                if Self::refine(&mut self.swings.highs, index, cur_high, |cur, last| cur > last) {
                    trace!(index, price = cur_high, "swing high extended");
                } else if cur_low < prev_low * (1.0 - self.threshold) {
                    self.open(Direction::Falling, index, cur_low);
                }
            }
            Direction::Falling => {
                if Self::refine(&mut self.swings.lows, index, cur_low, |cur, last| cur < last) {
                    trace!(index, price = cur_low, "swing low extended");
                } else if cur_high > prev_high * (1.0 + self.threshold) {
                    self.open(Direction::Rising, index, cur_high);
                }
            }
        }
    }

    /// Currently active swing direction.
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Reversal threshold this detector was created with.
    #[inline]
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[inline]
    #[must_use]
    pub fn swings(&self) -> &Swings {
        &self.swings
    }

    #[must_use]
    pub fn into_swings(self) -> Swings {
        self.swings
    }

    /// The refinable point of the active direction: last high while rising,
    /// last low while falling, `None` while undetermined.
    #[must_use]
    pub fn active_point(&self) -> Option<SwingPoint> {
        match self.direction {
            Direction::Undetermined => None,
            Direction::Rising => self.swings.highs.last().copied(),
            Direction::Falling => self.swings.lows.last().copied(),
        }
    }

    fn last_index(&self) -> Option<usize> {
        let high = self.swings.highs.last().map(SwingPoint::index);
        let low = self.swings.lows.last().map(SwingPoint::index);
        high.max(low)
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            direction: self.direction,
            highs: self.swings.highs.len(),
            lows: self.swings.lows.len(),
            last_high: self.swings.highs.last().copied(),
            last_low: self.swings.lows.last().copied(),
        }
    }

    /// Undoes every step taken since `checkpoint` was captured.
    ///
    /// Exact as long as at most one step happened in between: a step either
    /// appends one point or rewrites the last one.
    pub(crate) fn rollback(&mut self, checkpoint: &Checkpoint) {
        self.direction = checkpoint.direction;
        Self::restore(&mut self.swings.highs, checkpoint.highs, checkpoint.last_high);
        Self::restore(&mut self.swings.lows, checkpoint.lows, checkpoint.last_low);
    }

    fn open(&mut self, direction: Direction, index: usize, price: Price) {
        let (points, kind) = match direction {
            Direction::Rising => (&mut self.swings.highs, SwingKind::High),
            Direction::Falling => (&mut self.swings.lows, SwingKind::Low),
            Direction::Undetermined => return,
        };

        debug!(index, price, from = %self.direction, to = %direction, "swing direction changed");
        points.push(SwingPoint::new(index, price, kind));
        self.direction = direction;
    }

    fn refine(
        points: &mut [SwingPoint],
        index: usize,
        price: Price,
        extends: impl Fn(Price, Price) -> bool,
    ) -> bool {
        match points.last_mut() {
            Some(last) if extends(price, last.price()) => {
                *last = SwingPoint::new(index, price, last.kind());
                true
            }
            _ => false,
        }
    }

    fn restore(points: &mut Vec<SwingPoint>, len: usize, last: Option<SwingPoint>) {
        points.truncate(len);
        if let (Some(slot), Some(last)) = (points.last_mut(), last) {
            *slot = last;
        }
    }
}

/// Detector state before a step, used by [`ZigZag`](crate::ZigZag) to
/// repaint the current bar.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Checkpoint {
    direction: Direction,
    highs: usize,
    lows: usize,
    last_high: Option<SwingPoint>,
    last_low: Option<SwingPoint>,
}
