use chrono::Weekday;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::{Error, Result};

static ENGLISH: Lazy<NameTable> = Lazy::new(|| NameTable {
    months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect(),
    days: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    abbreviated_days: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        .iter()
        .map(|s| s.to_string())
        .collect(),
});

/// Month and day names used for headers and column labels. Day lists start
/// at Monday.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NameTable {
    months: Vec<String>,
    days: Vec<String>,
    abbreviated_days: Vec<String>,
}

impl NameTable {
    pub fn english() -> Self {
        ENGLISH.clone()
    }

    pub fn new(months: Vec<String>, days: Vec<String>, abbreviated_days: Vec<String>) -> Result<Self> {
        let table = NameTable {
            months,
            days,
            abbreviated_days,
        };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<()> {
        if self.months.len() != 12 {
            return Err(Error::config(&format!(
                "Name table needs 12 month names, got {}",
                self.months.len()
            )));
        }
        if self.days.len() != 7 || self.abbreviated_days.len() != 7 {
            return Err(Error::config("Name table needs 7 full and 7 abbreviated day names"));
        }
        Ok(())
    }

    /// Name of the 1-based `month`.
    pub fn month(&self, month: u32) -> &str {
        &self.months[(month as usize + 11) % 12]
    }

    pub fn day(&self, weekday: Weekday) -> &str {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    pub fn abbreviated_day(&self, weekday: Weekday) -> &str {
        &self.abbreviated_days[weekday.num_days_from_monday() as usize]
    }

    pub fn day_initial(&self, weekday: Weekday) -> String {
        self.day(weekday).chars().take(1).collect()
    }
}

impl Default for NameTable {
    fn default() -> Self {
        NameTable::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_lookup() {
        let names = NameTable::default();
        assert_eq!(names.month(1), "January");
        assert_eq!(names.month(12), "December");
        assert_eq!(names.day(Weekday::Sun), "Sunday");
        assert_eq!(names.abbreviated_day(Weekday::Wed), "Wed");
        assert_eq!(names.day_initial(Weekday::Thu), "T");
    }

    #[test]
    fn custom_tables_are_checked() {
        let days: Vec<String> = ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(NameTable::new(vec!["Januar".to_owned()], days.clone(), days.clone()).is_err());

        let months = (1..=12).map(|m| format!("M{}", m)).collect();
        let table = NameTable::new(months, days.clone(), days).unwrap();
        assert_eq!(table.month(3), "M3");
        assert_eq!(table.day_initial(Weekday::Sun), "S");
    }
}
