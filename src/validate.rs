use crate::{MalformedBarError, MalformedReason, Ohlcv};

/// Checks bars before detection.
///
/// [`detect`](crate::detect) accepts anything; this pass is what keeps
/// inverted or non-finite bars away from it.
///
/// # Errors
///
/// Returns the first bar whose high or low is not finite, or whose low is
/// above its high.
pub fn validate_bars<B: Ohlcv>(bars: &[B]) -> Result<(), MalformedBarError> {
    for (index, bar) in bars.iter().enumerate() {
        let (high, low) = (bar.high(), bar.low());

        let reason = if !high.is_finite() || !low.is_finite() {
            MalformedReason::NonFinite
        } else if low > high {
            MalformedReason::Inverted
        } else {
            continue;
        };

        return Err(MalformedBarError {
            index,
            high,
            low,
            reason,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::bars;

    #[test]
    fn accepts_well_formed() {
        assert_eq!(validate_bars(&bars(&[10.0, 11.0], &[5.0, 11.0])), Ok(()));
    }

    #[test]
    fn accepts_empty() {
        assert_eq!(validate_bars::<crate::Bar>(&[]), Ok(()));
    }

    #[test]
    fn rejects_inverted() {
        let err = validate_bars(&bars(&[10.0, 9.0, 8.0], &[5.0, 9.5, 9.0])).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.reason, MalformedReason::Inverted);
    }

    #[test]
    fn rejects_nan() {
        let err = validate_bars(&bars(&[10.0, f64::NAN], &[5.0, 4.0])).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.reason, MalformedReason::NonFinite);
    }

    #[test]
    fn rejects_infinite_low() {
        let err = validate_bars(&bars(&[10.0], &[f64::NEG_INFINITY])).unwrap_err();
        assert_eq!(err.reason, MalformedReason::NonFinite);
    }
}
