use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::errors::{Error, Result};

trait EnumValidCsv: IntoEnumIterator + AsRef<str> + Sized {
    fn valid_csv() -> String {
        Self::iter()
            .map(|v| v.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
impl<T> EnumValidCsv for T where T: IntoEnumIterator + AsRef<str> + Sized {}
pub fn valid_csv<T>() -> String
where
    T: IntoEnumIterator + AsRef<str> + Sized,
{
    <T as EnumValidCsv>::valid_csv()
}

/// Parse a strum enum, naming the valid values in the error.
pub fn parse_enum<T>(s: &str, what: &str) -> Result<T>
where
    T: IntoEnumIterator + AsRef<str> + FromStr + Sized,
{
    T::from_str(s.trim()).map_err(|_| {
        Error::Parse(format!(
            "Unsupported {what}: '{}'. Valid values: {}",
            s.trim(),
            valid_csv::<T>()
        ))
    })
}
