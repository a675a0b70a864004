use chrono::{Datelike, NaiveDate};

use crate::error::RainfallError;

/// Expands an inclusive date range into `(year, month)` pairs at monthly
/// granularity.
///
/// Day-of-month never affects membership: the month containing `start` opens
/// the sequence and the month containing `end` closes it, even when `end`
/// falls mid-month. A start month after the end month yields an empty
/// sequence.
pub fn expand_months(start: &str, end: &str) -> Result<Vec<(i32, u32)>, RainfallError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;

    let mut months = Vec::new();
    let (mut year, mut month) = (start.year(), start.month());
    while (year, month) <= (end.year(), end.month()) {
        months.push((year, month));
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    Ok(months)
}

fn parse_date(value: &str) -> Result<NaiveDate, RainfallError> {
    value
        .parse::<NaiveDate>()
        .map_err(|_| RainfallError::InvalidDate(value.to_string()))
}
