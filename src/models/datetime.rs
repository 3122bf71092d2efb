//! ISO-8601 local date-times as accepted on the wire
//!
//! Seconds are optional: `2023-10-20T10:00` and `2023-10-20T10:00:00.5` both parse.

use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer};

const WITH_SECONDS: &str = "%Y-%m-%dT%H:%M:%S%.f";
const WITHOUT_SECONDS: &str = "%Y-%m-%dT%H:%M";

pub fn parse(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, WITH_SECONDS)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, WITHOUT_SECONDS))
        .map_err(|_| format!("Invalid date-time {:?}, expected YYYY-MM-DDTHH:MM[:SS]", raw))
}

/// `deserialize_with` helper for optional date-time fields; pair with `#[serde(default)]`
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse(&raw).map_err(de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_seconds_are_optional() {
        let expected = NaiveDate::from_ymd_opt(2023, 10, 20)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        assert_eq!(parse("2023-10-20T10:00").unwrap(), expected);
        assert_eq!(parse("2023-10-20T10:00:00").unwrap(), expected);
        assert_eq!(
            parse("2023-10-20T10:00:00.250").unwrap(),
            expected + chrono::Duration::milliseconds(250)
        );
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        assert!(parse("2023-10-20").is_err());
        assert!(parse("20.10.2023 10:00").is_err());
        assert!(parse("2023-10-20T10").is_err());
    }
}
