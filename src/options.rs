use crate::calendar::{Annotation, MonthDefinition, YearDefinition};
use crate::drawing::Color;
use crate::error::Result;
use crate::font::Font;
use crate::names::NameTable;
use crate::page::{Margins, PageSize};
use crate::style::{CornerMode, DeadBoxMode, LiveBoxMode, RowMode};

#[derive(Debug, Clone, PartialEq)]
pub struct MonthOptions {
    pub page_size: PageSize,
    pub margins: Margins,
    pub month: MonthDefinition,
    pub names: NameTable,
    pub day_names_font: Font,
    pub numbers_font: Font,
    pub month_font: Font,
    pub year_font: Font,
    /// Font given to holidays when `Config::annotations` builds them. The layout
    /// itself draws each annotation with its own `Annotation::font`.
    pub holiday_font: Font,
    /// Font given to configured occasions by `Config::annotations`.
    pub occasion_font: Font,
    pub row_mode: RowMode,
    pub dead_box_mode: DeadBoxMode,
    pub live_box_mode: LiveBoxMode,
    pub corner_mode: CornerMode,
    pub draw_margin: bool,
    pub draw_outline_box: bool,
    pub draw_month: bool,
    pub draw_year: bool,
    pub abbreviate_day_names: bool,
    pub annotations: Vec<Annotation>,
}

impl Default for MonthOptions {
    fn default() -> Self {
        MonthOptions {
            page_size: PageSize::A4,
            margins: Margins::default(),
            month: MonthDefinition::default(),
            names: NameTable::default(),
            day_names_font: Font::new("Arial", 14.0),
            numbers_font: Font::new("Arial", 12.0),
            month_font: Font::new("Arial", 22.0),
            year_font: Font::new("Arial", 22.0),
            holiday_font: Annotation::default_font(),
            occasion_font: Annotation::default_font(),
            row_mode: RowMode::Six,
            dead_box_mode: DeadBoxMode::Invisible,
            live_box_mode: LiveBoxMode::Visible,
            corner_mode: CornerMode::Rounded2,
            draw_margin: false,
            draw_outline_box: false,
            draw_month: true,
            draw_year: true,
            abbreviate_day_names: false,
            annotations: Vec::new(),
        }
    }
}

impl MonthOptions {
    pub fn new(month: MonthDefinition) -> Self {
        MonthOptions {
            month,
            ..MonthOptions::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.month.validate()?;
        self.margins.validate()?;
        self.names.validate()?;
        self.day_names_font.validate("day names")?;
        self.numbers_font.validate("numbers")?;
        self.month_font.validate("month")?;
        self.year_font.validate("year")?;
        self.holiday_font.validate("holiday")?;
        self.occasion_font.validate("occasion")?;
        for annotation in &self.annotations {
            annotation.font.validate("annotation")?;
        }
        Ok(())
    }

    /// Replaces the annotation list, e.g. between successive months.
    pub fn set_annotations(&mut self, annotations: Vec<Annotation>) {
        self.annotations = annotations;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearOptions {
    pub page_size: PageSize,
    pub margins: Margins,
    pub year: YearDefinition,
    pub names: NameTable,
    pub draw_margin: bool,
    pub month_header_background: Color,
    pub month_names_font: Font,
    pub day_initials_font: Font,
    pub numbers_font: Font,
}

impl Default for YearOptions {
    fn default() -> Self {
        YearOptions {
            page_size: PageSize::A4,
            margins: Margins::default(),
            year: YearDefinition::default(),
            names: NameTable::default(),
            draw_margin: false,
            month_header_background: Color::rgb(211, 211, 211),
            month_names_font: Font::new("Arial", 12.0).bold(),
            day_initials_font: Font::new("Arial", 9.0),
            numbers_font: Font::new("Arial", 9.0),
        }
    }
}

impl YearOptions {
    pub fn new(year: YearDefinition) -> Self {
        YearOptions {
            year,
            ..YearOptions::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.year.validate()?;
        self.margins.validate()?;
        self.names.validate()?;
        self.month_names_font.validate("month names")?;
        self.day_initials_font.validate("day initials")?;
        self.numbers_font.validate("numbers")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn defaults_are_valid() {
        let options = MonthOptions::new(MonthDefinition::new(2023, 10, Weekday::Mon));
        assert!(options.validate().is_ok());
        assert_eq!(options.row_mode, RowMode::Six);
        assert_eq!(options.corner_mode, CornerMode::Rounded2);
        assert!(YearOptions::new(YearDefinition::new(2023, Weekday::Sun))
            .validate()
            .is_ok());
    }

    #[test]
    fn invalid_values_fail_validation() {
        let mut options = MonthOptions::new(MonthDefinition::new(2023, 10, Weekday::Mon));
        options.margins.left = 60.0;
        assert!(options.validate().unwrap_err().is_configuration());

        let mut options = MonthOptions::new(MonthDefinition::new(2023, 10, Weekday::Mon));
        options.month_font.point_size = -3.0;
        assert!(options.validate().is_err());

        let mut options = YearOptions::new(YearDefinition::new(2023, Weekday::Mon));
        options.year.year = 1800;
        assert!(options.validate().is_err());
    }
}
