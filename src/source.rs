use std::{
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    DataRetrievalError, Ohlcv, Price, Result, Swings, Timestamp, detect, validate_bars,
};

/// Kline interval.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Interval {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    OneHour,
    FourHours,
    OneDay,
}

impl Interval {
    /// Bar duration in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        const MINUTE: u64 = 60_000;

        match self {
            Self::OneMinute => MINUTE,
            Self::FiveMinutes => 5 * MINUTE,
            Self::FifteenMinutes => 15 * MINUTE,
            Self::OneHour => 60 * MINUTE,
            Self::FourHours => 240 * MINUTE,
            Self::OneDay => 1_440 * MINUTE,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::OneHour => "1h",
            Self::FourHours => "4h",
            Self::OneDay => "1d",
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = DataRetrievalError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "1m" => Self::OneMinute,
            "5m" => Self::FiveMinutes,
            "15m" => Self::FifteenMinutes,
            "1h" => Self::OneHour,
            "4h" => Self::FourHours,
            "1d" => Self::OneDay,
            other => return Err(DataRetrievalError::UnknownInterval(other.to_owned())),
        })
    }
}

/// Which bars to fetch: one symbol, one interval, an inclusive
/// `open_time` range in milliseconds.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct BarRequest {
    symbol: String,
    interval: Interval,
    start: Timestamp,
    end: Timestamp,
}

impl BarRequest {
    #[must_use]
    pub fn new(symbol: impl Into<String>, interval: Interval, start: Timestamp, end: Timestamp) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            start,
            end,
        }
    }

    #[inline]
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    #[must_use]
    pub fn interval(&self) -> Interval {
        self.interval
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Whether a bar opening at `open_time` falls in the requested range.
    #[inline]
    #[must_use]
    pub fn contains(&self, open_time: Timestamp) -> bool {
        (self.start..=self.end).contains(&open_time)
    }
}

/// Supplier of chronologically ordered bars.
///
/// Implementations own retrieval, parsing, and ordering. Failures surface
/// as [`DataRetrievalError`] and never reach detection.
pub trait BarSource {
    type Bar: Ohlcv;

    /// Fetches the bars matching `request`, oldest first.
    ///
    /// # Errors
    ///
    /// Any failure to obtain or decode the bars.
    fn fetch(&self, request: &BarRequest) -> std::result::Result<Vec<Self::Bar>, DataRetrievalError>;
}

/// Kline row in Binance CSV export layout.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Kline {
    pub open_time: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: f64,
}

impl Ohlcv for Kline {
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

/// Reads klines from a directory of CSV exports named
/// `{symbol}-{interval}.csv`, e.g. `btcusdt-1h.csv`.
///
/// The symbol is lowercased to build the file name. Rows must be sorted by
/// `open_time`; rows outside the requested range are skipped.
#[derive(Clone, Debug)]
pub struct CsvBarSource {
    dir: PathBuf,
}

impl CsvBarSource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, request: &BarRequest) -> PathBuf {
        self.dir.join(format!(
            "{}-{}.csv",
            request.symbol.to_lowercase(),
            request.interval
        ))
    }
}

impl BarSource for CsvBarSource {
    type Bar = Kline;

    fn fetch(&self, request: &BarRequest) -> std::result::Result<Vec<Kline>, DataRetrievalError> {
        let path = self.path_for(request);
        let csv_error = |source| DataRetrievalError::Csv {
            path: path.clone(),
            source,
        };

        let mut reader = csv::Reader::from_path(&path).map_err(csv_error)?;
        let mut klines = Vec::new();
        let mut previous = None;

        for (index, record) in reader.deserialize::<Kline>().enumerate() {
            let kline = record.map_err(csv_error)?;

            if let Some(previous) = previous
                && kline.open_time < previous
            {
                return Err(DataRetrievalError::OutOfOrder {
                    index,
                    open_time: kline.open_time,
                    previous,
                });
            }
            previous = Some(kline.open_time);

            if request.contains(kline.open_time) {
                klines.push(kline);
            }
        }

        debug!(path = %path.display(), bars = klines.len(), "loaded klines");
        Ok(klines)
    }
}

/// Fetches bars, validates them, and runs [`detect`].
///
/// # Errors
///
/// [`Error::DataRetrieval`](crate::Error::DataRetrieval) when the source
/// fails, [`Error::MalformedBar`](crate::Error::MalformedBar) when a fetched
/// bar does not pass [`validate_bars`]. Detection itself cannot fail.
pub fn fetch_and_detect<S>(source: &S, request: &BarRequest, threshold: f64) -> Result<Swings>
where
    S: BarSource + ?Sized,
{
    let bars = source.fetch(request)?;

    validate_bars(&bars).inspect_err(|err| {
        warn!(symbol = request.symbol(), interval = %request.interval(), %err, "rejected bars");
    })?;

    Ok(detect(&bars, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bar, Error, MalformedReason, test_util::bars};

    struct StaticSource(Vec<Bar>);

    impl BarSource for StaticSource {
        type Bar = Bar;

        fn fetch(&self, _: &BarRequest) -> std::result::Result<Vec<Bar>, DataRetrievalError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl BarSource for FailingSource {
        type Bar = Bar;

        fn fetch(&self, _: &BarRequest) -> std::result::Result<Vec<Bar>, DataRetrievalError> {
            Err(DataRetrievalError::Provider("rate limited".into()))
        }
    }

    fn request() -> BarRequest {
        BarRequest::new("BTCUSDT", Interval::OneHour, 0, u64::MAX)
    }

    mod interval {
        use super::*;

        #[test]
        fn parses_and_formats() {
            for s in ["1m", "5m", "15m", "1h", "4h", "1d"] {
                assert_eq!(s.parse::<Interval>().unwrap().to_string(), s);
            }
        }

        #[test]
        fn rejects_unknown() {
            let err = "2h".parse::<Interval>().unwrap_err();
            assert!(matches!(err, DataRetrievalError::UnknownInterval(s) if s == "2h"));
        }

        #[test]
        fn millis() {
            assert_eq!(Interval::OneHour.as_millis(), 3_600_000);
            assert_eq!(Interval::OneDay.as_millis(), 86_400_000);
        }
    }

    mod request {
        use super::*;

        #[test]
        fn range_is_inclusive() {
            let r = BarRequest::new("ETHUSDT", Interval::FiveMinutes, 10, 20);
            assert!(r.contains(10));
            assert!(r.contains(20));
            assert!(!r.contains(9));
            assert!(!r.contains(21));
        }
    }

    mod csv_source {
        use super::*;

        #[test]
        fn file_name_uses_lowercase_symbol() {
            let source = CsvBarSource::new("data");
            assert_eq!(
                source.path_for(&request()),
                Path::new("data").join("btcusdt-1h.csv")
            );
        }

        #[test]
        fn missing_file_is_retrieval_error() {
            let source = CsvBarSource::new("does/not/exist");
            let err = source.fetch(&request()).unwrap_err();
            assert!(matches!(err, DataRetrievalError::Csv { .. }));
        }
    }

    mod pipeline {
        use super::*;

        #[test]
        fn detects_on_valid_bars() {
            let source = StaticSource(bars(&[10.0, 11.0, 12.0, 9.0], &[5.0, 6.0, 7.0, 4.0]));
            let swings = fetch_and_detect(&source, &request(), 0.1).unwrap();
            assert_eq!(swings.len(), 2);
        }

        #[test]
        fn surfaces_retrieval_error() {
            let err = fetch_and_detect(&FailingSource, &request(), 0.1).unwrap_err();
            assert!(matches!(err, Error::DataRetrieval(DataRetrievalError::Provider(_))));
        }

        #[test]
        fn rejects_malformed_before_detection() {
            let source = StaticSource(bars(&[10.0, 4.0], &[5.0, 6.0]));
            let err = fetch_and_detect(&source, &request(), 0.1).unwrap_err();
            assert!(matches!(
                err,
                Error::MalformedBar(e) if e.index == 1 && e.reason == MalformedReason::Inverted
            ));
        }

        #[test]
        fn works_through_trait_object() {
            let source: Box<dyn BarSource<Bar = Bar>> = Box::new(StaticSource(Vec::new()));
            let swings = fetch_and_detect(source.as_ref(), &request(), 0.1).unwrap();
            assert!(swings.is_empty());
        }
    }
}
