use serde::Serialize;

use crate::error::DawaError;

pub fn to_pretty<T: Serialize>(value: &T) -> Result<String, DawaError> {
    Ok(serde_json::to_string_pretty(value)?)
}
