//! Legacy date functions
//!
//! Conversion failures are reported as `EVALUATION` or `INVALID_ARGUMENT`
//! errors, like every other legacy failure.

use super::deprecation::notice;
use crate::accessors::{DateExt, ImageExt};
use geetools_core::{Date, EeNumber, Evaluate, GeeError, Image};
use time::OffsetDateTime;

#[deprecated(since = "1.0.0", note = "use date.geetools().to_datetime")]
pub fn to_datetime<E: Evaluate>(date: &Date, evaluator: &E) -> Result<OffsetDateTime, GeeError>
where
    E::Error: 'static,
{
    notice("tools::date::to_datetime")?;
    date.geetools()
        .to_datetime(evaluator)
        .map_err(|e| GeeError::evaluation(e.to_string()))
}

/// Epoch milliseconds are the same locally and remotely, so this converts
/// without a round trip
#[deprecated(since = "1.0.0", note = "use OffsetDateTime::from_unix_timestamp_nanos")]
pub fn millis_to_datetime(millis: i64) -> Result<OffsetDateTime, GeeError> {
    notice("tools::date::millis_to_datetime")?;
    geetools_std::millis_to_datetime(millis).map_err(|e| GeeError::invalid_argument("millis_to_datetime", e.to_string()))
}

#[deprecated(since = "1.0.0", note = "use date.geetools().unit_since_epoch")]
pub fn unit_since_epoch(date: &Date, unit: &str) -> Result<EeNumber, GeeError> {
    notice("tools::date::unit_since_epoch")?;
    date.geetools().unit_since_epoch(unit)
}

/// Image with its acquisition time added as a `date` band
#[deprecated(since = "1.0.0", note = "use image.geetools().add_date")]
pub fn make_date_band(image: &Image) -> Result<Image, GeeError> {
    notice("tools::date::make_date_band")?;
    Ok(image.geetools().add_date())
}
