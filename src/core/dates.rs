//! Birth-date fragments to ages.
//!
//! Fragments arrive already captured by an extractor ("12/05/1985",
//! "12 May 1985", "1985-05-12", "05/85", "1985"). Anything that cannot be
//! resolved becomes age 0, the "unknown" value.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use super::errors::DateError;
use super::lexicon::MONTHS;
use super::validators::is_valid_age;

static DELIMITER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s./,\-]+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DatePart {
    Number { value: u32, digits: usize },
    Month(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateLayout {
    DayMonthYear,
    MonthDayYear,
    IsoYearMonthDay,
    MonthYear,
    YearOnly,
}

const LAYOUTS: [DateLayout; 5] = [
    DateLayout::DayMonthYear,
    DateLayout::MonthDayYear,
    DateLayout::IsoYearMonthDay,
    DateLayout::MonthYear,
    DateLayout::YearOnly,
];

impl DateLayout {
    fn parse(self, parts: &[DatePart]) -> Option<NaiveDate> {
        match (self, parts) {
            (DateLayout::DayMonthYear, [day, month, year]) => {
                NaiveDate::from_ymd_opt(year_of(*year)?, month_of(*month)?, number_of(*day)?)
            }
            (DateLayout::MonthDayYear, [month, day, year]) => {
                NaiveDate::from_ymd_opt(year_of(*year)?, month_of(*month)?, number_of(*day)?)
            }
            (DateLayout::IsoYearMonthDay, [year, month, day]) => match year {
                DatePart::Number { digits: 4, .. } => {
                    NaiveDate::from_ymd_opt(year_of(*year)?, month_of(*month)?, number_of(*day)?)
                }
                _ => None,
            },
            (DateLayout::MonthYear, [month, year]) => {
                NaiveDate::from_ymd_opt(year_of(*year)?, month_of(*month)?, 1)
            }
            (DateLayout::YearOnly, [year @ DatePart::Number { digits: 4, .. }]) => {
                NaiveDate::from_ymd_opt(year_of(*year)?, 1, 1)
            }
            _ => None,
        }
    }
}

fn number_of(part: DatePart) -> Option<u32> {
    match part {
        DatePart::Number { value, .. } => Some(value),
        DatePart::Month(_) => None,
    }
}

fn month_of(part: DatePart) -> Option<u32> {
    let month = match part {
        DatePart::Number { value, .. } => value,
        DatePart::Month(month) => month,
    };
    (1..=12).contains(&month).then_some(month)
}

/// Two-digit years pivot at 50: 51..=99 are 1900s, 00..=50 are 2000s.
fn year_of(part: DatePart) -> Option<i32> {
    match part {
        DatePart::Number { value, digits: 4 } => i32::try_from(value).ok(),
        DatePart::Number { value, digits: 1..=2 } => {
            let value = i32::try_from(value).ok()?;
            Some(if value > 50 { 1900 + value } else { 2000 + value })
        }
        _ => None,
    }
}

fn tokenize(fragment: &str) -> Result<Vec<DatePart>, DateError> {
    let normalized = fragment.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(DateError::Empty);
    }

    DELIMITER_RE
        .split(&normalized)
        .filter(|token| !token.is_empty())
        .map(|token| {
            if token.chars().all(|c| c.is_ascii_digit()) {
                token
                    .parse::<u32>()
                    .map(|value| DatePart::Number {
                        value,
                        digits: token.len(),
                    })
                    .map_err(|_| DateError::NoLayout(fragment.to_string()))
            } else {
                MONTHS
                    .get(token)
                    .map(|month| DatePart::Month(*month))
                    .ok_or_else(|| DateError::UnknownMonth(token.to_string()))
            }
        })
        .collect()
}

pub fn parse_birth_date(fragment: &str) -> Result<NaiveDate, DateError> {
    let parts = tokenize(fragment)?;
    LAYOUTS
        .iter()
        .find_map(|layout| layout.parse(&parts))
        .ok_or_else(|| DateError::NoLayout(fragment.to_string()))
}

/// Whole years between `birth` and `today`, minus one if this year's
/// birthday has not happened yet.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> Result<u32, DateError> {
    let mut age = i64::from(today.year()) - i64::from(birth.year());
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }

    if !is_valid_age(age) {
        return Err(DateError::AgeOutOfRange(age));
    }
    u32::try_from(age).map_err(|_| DateError::AgeOutOfRange(age))
}

pub fn resolve_age_on(fragment: &str, today: NaiveDate) -> u32 {
    match parse_birth_date(fragment).and_then(|birth| age_on(birth, today)) {
        Ok(age) => age,
        Err(err) => {
            tracing::debug!(fragment, error = %err, "birth date left unresolved");
            0
        }
    }
}

pub fn resolve_age(fragment: &str) -> u32 {
    resolve_age_on(fragment, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn day_month_year_is_preferred() {
        assert_eq!(
            parse_birth_date("12/05/1985"),
            Ok(NaiveDate::from_ymd_opt(1985, 5, 12).unwrap())
        );
        assert_eq!(resolve_age_on("12/05/1985", today()), 41);
    }

    #[test]
    fn birthday_not_yet_reached_decrements() {
        let before_birthday = NaiveDate::from_ymd_opt(2026, 5, 11).unwrap();
        let on_birthday = NaiveDate::from_ymd_opt(2026, 5, 12).unwrap();
        assert_eq!(resolve_age_on("12/05/1985", before_birthday), 40);
        assert_eq!(resolve_age_on("12/05/1985", on_birthday), 41);
    }

    #[test]
    fn falls_back_to_month_day_year() {
        assert_eq!(
            parse_birth_date("05/25/1990"),
            Ok(NaiveDate::from_ymd_opt(1990, 5, 25).unwrap())
        );
    }

    #[test]
    fn worded_months_and_mixed_delimiters() {
        assert_eq!(resolve_age_on("12 May 1985", today()), 41);
        assert_eq!(resolve_age_on("12-Sept-1985", today()), 41);
        assert_eq!(resolve_age_on("December 3, 1990", today()), 35);
        assert_eq!(resolve_age_on("12.05.1985", today()), 41);
    }

    #[test]
    fn iso_month_year_and_year_only_layouts() {
        assert_eq!(resolve_age_on("1985-05-12", today()), 41);
        assert_eq!(resolve_age_on("11/1985", today()), 40);
        assert_eq!(resolve_age_on("1985", today()), 41);
    }

    #[test]
    fn two_digit_years_pivot_at_fifty() {
        assert_eq!(resolve_age_on("12/05/85", today()), 41);
        assert_eq!(resolve_age_on("12/05/20", today()), 6);
        assert_eq!(resolve_age_on("12/05/50", today()), 0);
        assert_eq!(resolve_age_on("01/51", today()), 75);
    }

    #[test]
    fn unparseable_fragments_yield_unknown() {
        assert_eq!(resolve_age_on("", today()), 0);
        assert_eq!(resolve_age_on("sometime", today()), 0);
        assert_eq!(resolve_age_on("31/02/1990", today()), 0);
        assert_eq!(resolve_age_on("01/01/2030", today()), 0);
        assert_eq!(resolve_age_on("1900", today()), 0);
        assert_eq!(
            parse_birth_date("sometime"),
            Err(DateError::UnknownMonth("sometime".to_string()))
        );
    }

    #[test]
    fn resolve_age_uses_the_local_date() {
        let year = Local::now().date_naive().year();
        assert_eq!(resolve_age("1985"), u32::try_from(year - 1985).unwrap());
        assert_eq!(resolve_age("not a date"), 0);
    }

    #[test]
    fn resolved_ages_stay_in_range() {
        let fragments = [
            "12/05/1985", "1/1/1926", "1/1/1925", "12/12/12", "99", "13/13/2013", "2026",
            "07/99", "feb 2001", "29/02/2000",
        ];
        for fragment in fragments {
            let age = resolve_age_on(fragment, today());
            assert!(age <= 100, "{fragment} resolved to {age}");
        }
    }
}
