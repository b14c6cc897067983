use time::{format_description::FormatItem, macros::format_description, Date};
use thiserror::Error;

const DISPLAY: &[FormatItem<'static>] = format_description!("[day]/[month]/[year]");
const ISO: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Error)]
pub enum DateFormatError {
    #[error("date is missing")]
    Missing,
    #[error("cannot format date: {0}")]
    Format(#[from] time::error::Format),
    #[error("invalid date {input:?}, expected YYYY-MM-DD")]
    Parse {
        input: String,
        #[source]
        source: time::error::Parse,
    },
}

/// Renders `date` as zero-padded `DD/MM/YYYY`.
pub fn format(date: Date) -> Result<String, DateFormatError> {
    Ok(date.format(DISPLAY)?)
}

pub fn format_optional(date: Option<Date>) -> Result<String, DateFormatError> {
    format(date.ok_or(DateFormatError::Missing)?)
}

/// Parses a `YYYY-MM-DD` request date.
pub fn parse_iso(input: &str) -> Result<Date, DateFormatError> {
    Date::parse(input, ISO).map_err(|source| DateFormatError::Parse {
        input: input.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn pads_day_and_month() {
        assert_eq!(format(date!(2000 - 01 - 01)).unwrap(), "01/01/2000");
        assert_eq!(format(date!(1987 - 11 - 23)).unwrap(), "23/11/1987");
    }

    #[test]
    fn missing_date_is_an_error() {
        assert!(matches!(format_optional(None), Err(DateFormatError::Missing)));
        assert_eq!(format_optional(Some(date!(2024 - 02 - 29))).unwrap(), "29/02/2024");
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_iso("2000-01-01").unwrap(), date!(2000 - 01 - 01));
        assert!(parse_iso("01/01/2000").is_err());
        assert!(parse_iso("2023-02-30").is_err());
    }
}
