use crate::error::{PointPilotError, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Months in which award charts price at their peak rate.
const PEAK_MONTHS: [u32; 4] = [6, 7, 8, 12];

/// Pricing season of a travel date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Standard,
    Peak,
}

impl Season {
    pub fn for_date(date: NaiveDate) -> Self {
        if PEAK_MONTHS.contains(&date.month()) {
            Season::Peak
        } else {
            Season::Standard
        }
    }

    /// Season of an ISO `YYYY-MM-DD` string. Unparseable input is standard season.
    pub fn from_date_str(input: &str) -> Self {
        parse_travel_date(input)
            .map(Season::for_date)
            .unwrap_or_default()
    }
}

pub fn parse_travel_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|source| {
        PointPilotError::InvalidDate {
            input: input.to_string(),
            source,
        }
    })
}

/// Number of nights between check-in and check-out.
///
/// Always at least one. A missing check-out date, a check-out on or before
/// check-in, or either date failing to parse all count as a single night.
pub fn stay_nights(check_in: &str, check_out: Option<&str>) -> u32 {
    let Some(check_out) = check_out else {
        return 1;
    };

    match (parse_travel_date(check_in), parse_travel_date(check_out)) {
        (Ok(start), Ok(end)) => {
            let days = (end - start).num_days();
            u32::try_from(days).unwrap_or(0).max(1)
        }
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summer_and_december_are_peak() {
        assert_eq!(Season::from_date_str("2024-07-15"), Season::Peak);
        assert_eq!(Season::from_date_str("2024-06-01"), Season::Peak);
        assert_eq!(Season::from_date_str("2024-08-31"), Season::Peak);
        assert_eq!(Season::from_date_str("2024-12-24"), Season::Peak);
    }

    #[test]
    fn test_other_months_are_standard() {
        assert_eq!(Season::from_date_str("2024-03-01"), Season::Standard);
        assert_eq!(Season::from_date_str("2024-05-31"), Season::Standard);
        assert_eq!(Season::from_date_str("2024-09-01"), Season::Standard);
    }

    #[test]
    fn test_malformed_date_defaults_to_standard() {
        assert_eq!(Season::from_date_str("next tuesday"), Season::Standard);
        assert_eq!(Season::from_date_str("2024-13-01"), Season::Standard);
        assert_eq!(Season::from_date_str(""), Season::Standard);
    }

    #[test]
    fn test_parse_travel_date_reports_input() {
        let err = parse_travel_date("07/15/2024").unwrap_err();
        assert!(err.to_string().contains("07/15/2024"));
    }

    #[test]
    fn test_stay_nights() {
        assert_eq!(stay_nights("2024-07-01", None), 1);
        assert_eq!(stay_nights("2024-07-01", Some("2024-07-04")), 3);
        assert_eq!(stay_nights("2024-07-01", Some("2024-07-01")), 1);
        // Check-out before check-in
        assert_eq!(stay_nights("2024-07-04", Some("2024-07-01")), 1);
        assert_eq!(stay_nights("2024-07-01", Some("soon")), 1);
        assert_eq!(stay_nights("garbage", Some("2024-07-04")), 1);
    }

    #[test]
    fn test_stay_nights_across_month_boundary() {
        assert_eq!(stay_nights("2024-02-27", Some("2024-03-02")), 4);
    }
}
