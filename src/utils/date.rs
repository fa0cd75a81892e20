use chrono::NaiveDate;
use crate::core::library::{LibraryError, LibraryResult};

pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

// lending days travel as ISO calendar dates, e.g. 2025-09-01
pub const DAY_FMT: &str = "%Y-%m-%d";

pub fn parse_day(value: &str) -> LibraryResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DAY_FMT).map_err(|err| {
        LibraryError::validation(format!("invalid date {:?}, expected YYYY-MM-DD: {}", value, err).as_str(),
                                 Some("400".to_string()))
    })
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FMT).to_string()
}

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time.format(DATE_FMT).to_string().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        let time = NaiveDateTime::parse_from_str(&str_time, DATE_FMT).map_err(D::Error::custom)?;
        Ok(time)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::core::library::LibraryError;
    use crate::utils::date::{format_day, parse_day};

    #[tokio::test]
    async fn test_should_parse_iso_day() {
        let day = parse_day("2025-09-01").expect("should parse day");
        assert_eq!(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(), day);
        assert_eq!("2025-09-01", format_day(day));
    }

    #[tokio::test]
    async fn test_should_reject_malformed_day() {
        assert!(matches!(parse_day("01/09/2025"), Err(LibraryError::Validation { .. })));
        assert!(matches!(parse_day("2025-02-30"), Err(LibraryError::Validation { .. })));
    }
}
