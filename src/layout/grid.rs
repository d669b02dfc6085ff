//! Assignment of calendar days to the cells of a `rows x 7` month grid.

use chrono::{Datelike, Weekday};
use std::collections::HashMap;

use crate::calendar::MonthDefinition;
use crate::error::{Error, ErrorKind, Result};

pub const COLUMNS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBox {
    pub column: usize,
    pub row: usize,
    pub day: Option<u32>,
    pub weekday: Option<Weekday>,
    /// Second day number squeezed into a last-row cell in five-row mode.
    pub overflow_day: Option<u32>,
}

impl DayBox {
    fn dead(column: usize, row: usize) -> Self {
        DayBox {
            column,
            row,
            day: None,
            weekday: None,
            overflow_day: None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.day.is_some()
    }

    pub fn is_split(&self) -> bool {
        self.overflow_day.is_some()
    }

    pub fn index(&self) -> usize {
        self.row * COLUMNS + self.column
    }

    pub fn day_number(&self) -> Result<u32> {
        self.day.ok_or_else(|| {
            Error::new(
                ErrorKind::MissingDerivedAttribute,
                &format!("box {} carries no day number", self.index()),
            )
        })
    }

    pub fn day_of_week(&self) -> Result<Weekday> {
        self.weekday.ok_or_else(|| {
            Error::new(
                ErrorKind::MissingDerivedAttribute,
                &format!("box {} carries no weekday", self.index()),
            )
        })
    }
}

/// Which part of a box a day number occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Whole,
    Upper,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySlot {
    pub index: usize,
    pub region: Region,
}

#[derive(Debug, Clone)]
pub struct DayGrid {
    rows: usize,
    days_in_month: u32,
    boxes: Vec<DayBox>,
}

impl DayGrid {
    /// Scans the cells row by row. Numbering starts in the first cell whose
    /// column weekday matches the 1st of the month; days that do not fit are
    /// appended to the last row as overflow.
    pub fn assign(def: &MonthDefinition, rows: usize) -> Result<DayGrid> {
        let first_weekday = def.first_date()?.weekday();
        let last_day = def.days()?;

        let mut boxes = Vec::with_capacity(rows * COLUMNS);
        let mut day = 0u32;

        for row in 0..rows {
            for column in 0..COLUMNS {
                let weekday = def.column_weekday(column);
                let mut cell = DayBox::dead(column, row);

                if day == 0 && weekday == first_weekday {
                    day = 1;
                }

                if day > 0 {
                    if day <= last_day {
                        cell.day = Some(day);
                        cell.weekday = Some(weekday);
                    }
                    day += 1;
                }

                boxes.push(cell);
            }
        }

        if day <= last_day {
            assert!(
                rows < 6,
                "a six-row grid always holds a whole month"
            );

            let last_row = (rows - 1) * COLUMNS;
            for (offset, overflow) in (day..=last_day).enumerate() {
                boxes[last_row + offset].overflow_day = Some(overflow);
            }

            log::debug!(
                "{}-{:02}: {} day(s) overflow into the last row",
                def.year,
                def.month,
                last_day - day + 1
            );
        }

        Ok(DayGrid {
            rows,
            days_in_month: last_day,
            boxes,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn days_in_month(&self) -> u32 {
        self.days_in_month
    }

    pub fn boxes(&self) -> &[DayBox] {
        &self.boxes
    }

    pub fn live(&self) -> impl Iterator<Item = &DayBox> {
        self.boxes.iter().filter(|b| b.is_live())
    }

    pub fn overflow(&self) -> impl Iterator<Item = &DayBox> {
        self.boxes.iter().filter(|b| b.is_split())
    }

    pub fn overflow_count(&self) -> usize {
        self.overflow().count()
    }

    /// Day-of-month to box lookup, built once per generation.
    pub fn slots(&self) -> Result<HashMap<u32, DaySlot>> {
        let mut slots = HashMap::with_capacity(self.days_in_month as usize);

        for cell in self.live() {
            let region = if cell.is_split() {
                Region::Upper
            } else {
                Region::Whole
            };
            slots.insert(
                cell.day_number()?,
                DaySlot {
                    index: cell.index(),
                    region,
                },
            );
        }

        for cell in self.overflow() {
            if let Some(day) = cell.overflow_day {
                slots.insert(
                    day,
                    DaySlot {
                        index: cell.index(),
                        region: Region::Lower,
                    },
                );
            }
        }

        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::days_of_month;

    const WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    #[test]
    fn six_rows_hold_every_month() {
        for year in [1900, 2023, 2024, 2100].iter() {
            for month in 1..=12 {
                for &first in WEEKDAYS.iter() {
                    let def = MonthDefinition::new(*year, month, first);
                    let grid = DayGrid::assign(&def, 6).unwrap();
                    let mut days: Vec<u32> = grid.live().map(|b| b.day.unwrap()).collect();
                    days.sort_unstable();
                    let expected: Vec<u32> =
                        (1..=days_of_month(*year, month).unwrap()).collect();
                    assert_eq!(days, expected);
                    assert_eq!(grid.overflow_count(), 0);
                }
            }
        }
    }

    #[test]
    fn february_2024_starts_on_thursday_column() {
        let def = MonthDefinition::new(2024, 2, Weekday::Mon);
        let grid = DayGrid::assign(&def, 6).unwrap();

        assert_eq!(grid.live().count(), 29);
        let first = grid.live().next().unwrap();
        assert_eq!(first.day, Some(1));
        assert_eq!((first.row, first.column), (0, 3));
        assert_eq!(first.weekday, Some(Weekday::Thu));
        assert!(grid.boxes()[..3].iter().all(|b| !b.is_live()));
    }

    #[test]
    fn five_rows_overflow_into_last_row() {
        // March 2025 starts on a Saturday: six leading dead cells with Sunday first.
        let def = MonthDefinition::new(2025, 3, Weekday::Sun);
        let grid = DayGrid::assign(&def, 5).unwrap();

        assert_eq!(grid.live().count(), 29);
        assert_eq!(grid.overflow_count(), 2);

        let split: Vec<_> = grid.overflow().collect();
        assert_eq!((split[0].row, split[0].column), (4, 0));
        assert_eq!((split[0].day, split[0].overflow_day), (Some(23), Some(30)));
        assert_eq!((split[1].row, split[1].column), (4, 1));
        assert_eq!((split[1].day, split[1].overflow_day), (Some(24), Some(31)));

        let slots = grid.slots().unwrap();
        assert_eq!(slots.len(), 31);
        assert_eq!(slots[&30], DaySlot { index: 28, region: Region::Lower });
        assert_eq!(slots[&23], DaySlot { index: 28, region: Region::Upper });
        assert_eq!(slots[&22].region, Region::Whole);
    }

    #[test]
    fn five_rows_overflow_iff_days_exceed_live_cells() {
        for year in 2020..=2026 {
            for month in 1..=12 {
                for &first in WEEKDAYS.iter() {
                    let def = MonthDefinition::new(year, month, first);
                    let days = days_of_month(year, month).unwrap() as usize;
                    let offset = crate::calendar::weekday_column(
                        first,
                        def.first_date().unwrap().weekday(),
                    );
                    let grid = DayGrid::assign(&def, 5).unwrap();

                    let live = grid.live().count();
                    assert_eq!(live, days.min(35 - offset));
                    assert_eq!(grid.overflow_count(), days - live);

                    let overflow: Vec<u32> =
                        grid.overflow().filter_map(|b| b.overflow_day).collect();
                    let expected: Vec<u32> = ((live as u32 + 1)..=(days as u32)).collect();
                    assert_eq!(overflow, expected);
                    assert!(grid.overflow().all(|b| b.row == 4));
                }
            }
        }
    }

    #[test]
    fn dead_box_has_no_derived_attributes() {
        let def = MonthDefinition::new(2024, 2, Weekday::Mon);
        let grid = DayGrid::assign(&def, 6).unwrap();
        let dead = &grid.boxes()[0];
        assert!(matches!(
            dead.day_number().unwrap_err().kind,
            ErrorKind::MissingDerivedAttribute
        ));
        assert!(dead.day_of_week().is_err());
    }
}
