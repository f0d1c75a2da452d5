//! Delivery-month labels offered by intake and filter selectors.

use chrono::{Datelike, Months, NaiveDate};

/// Current month plus the following twelve.
pub const MONTH_OPTION_COUNT: u32 = 13;
const MONTH_LABEL_FORMAT: &str = "%b %Y";

/// Formats the delivery-month label for the month containing `date`.
pub fn month_label(date: NaiveDate) -> String {
    date.format(MONTH_LABEL_FORMAT).to_string()
}

/// Label for the month containing `today`, e.g. `Feb 2026`.
pub fn current_month_label(today: NaiveDate) -> String {
    month_label(today)
}

/// Returns `count` consecutive month labels starting at `today`'s month.
pub fn month_options(today: NaiveDate, count: u32) -> Vec<String> {
    let first_of_month = today.with_day(1).unwrap_or(today);
    (0..count)
        .map_while(|offset| first_of_month.checked_add_months(Months::new(offset)))
        .map(month_label)
        .collect()
}
