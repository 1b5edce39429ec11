//! Serialize `Duration` fields as fractional seconds.

use std::time::Duration;

use serde::Serializer;

pub(crate) fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}
