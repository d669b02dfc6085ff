use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Deserialize;

use crate::drawing::Color;
use crate::error::{Error, Result};
use crate::font::Font;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 3000;

pub fn days_of_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Weekday shown in grid column `col` when `first` is column 0.
pub fn column_weekday(first: Weekday, col: usize) -> Weekday {
    (0..col % 7).fold(first, |day, _| day.succ())
}

/// Inverse of [`column_weekday`].
pub fn weekday_column(first: Weekday, weekday: Weekday) -> usize {
    ((7 + weekday.num_days_from_monday() - first.num_days_from_monday()) % 7) as usize
}

fn validate_year(year: i32) -> Result<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(Error::config(&format!(
            "Year must be between {} and {}, got {}",
            MIN_YEAR, MAX_YEAR, year
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MonthDefinition {
    pub year: i32,
    pub month: u32,
    #[serde(default = "default_first_day")]
    pub first_day_of_week: Weekday,
}

fn default_first_day() -> Weekday {
    Weekday::Mon
}

impl MonthDefinition {
    pub fn new(year: i32, month: u32, first_day_of_week: Weekday) -> Self {
        MonthDefinition {
            year,
            month,
            first_day_of_week,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_year(self.year)?;
        if !(1..=12).contains(&self.month) {
            return Err(Error::config(&format!(
                "Month must be between 1 and 12, got {}",
                self.month
            )));
        }
        Ok(())
    }

    pub fn first_date(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| {
            Error::config(&format!("No such month {}-{:02}", self.year, self.month))
        })
    }

    pub fn days(&self) -> Result<u32> {
        days_of_month(self.year, self.month).ok_or_else(|| {
            Error::config(&format!("No such month {}-{:02}", self.year, self.month))
        })
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn column_weekday(&self, col: usize) -> Weekday {
        column_weekday(self.first_day_of_week, col)
    }
}

impl Default for MonthDefinition {
    fn default() -> Self {
        let today = chrono::Local::now().date_naive();
        MonthDefinition::new(today.year(), today.month(), Weekday::Mon)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct YearDefinition {
    pub year: i32,
    #[serde(default = "default_first_day")]
    pub first_day_of_week: Weekday,
}

impl YearDefinition {
    pub fn new(year: i32, first_day_of_week: Weekday) -> Self {
        YearDefinition {
            year,
            first_day_of_week,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_year(self.year)
    }

    pub fn month(&self, month: u32) -> MonthDefinition {
        MonthDefinition::new(self.year, month, self.first_day_of_week)
    }
}

impl Default for YearDefinition {
    fn default() -> Self {
        let today = chrono::Local::now().date_naive();
        YearDefinition::new(today.year(), Weekday::Mon)
    }
}

/// Date-keyed label such as a public holiday or a birthday.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub date: NaiveDate,
    pub title: String,
    pub font: Font,
}

impl Annotation {
    pub fn new<S: Into<String>>(date: NaiveDate, title: S) -> Self {
        Annotation {
            date,
            title: title.into(),
            font: Annotation::default_font(),
        }
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn default_font() -> Font {
        Font::new("Arial", 7.0).color(Color::DARK_GRAY)
    }
}

/// Dates of every day in the month, first to last.
pub fn dates_of_month(def: &MonthDefinition) -> Result<impl Iterator<Item = NaiveDate>> {
    let first = def.first_date()?;
    let days = def.days()?;
    Ok((0..days as i64).map(move |offset| first + Duration::days(offset)))
}
