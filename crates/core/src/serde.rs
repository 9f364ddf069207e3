//! Serde helper functions for query-string deserialization.

use serde::{de, Deserialize, Deserializer};

/// Deserialize a boolean flag, accepting `true`/`false` in any letter case.
///
/// Query strings like `?includePointsOfInterest=True` are common from
/// clients that format booleans with a capital letter.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if s.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(de::Error::invalid_value(
            de::Unexpected::Str(&s),
            &"true or false",
        ))
    }
}
