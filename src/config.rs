use chrono::{NaiveDate, Weekday};
use itertools::Itertools;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::iter::FromIterator;
use std::path::{Path, PathBuf};

use crate::calendar::{Annotation, MonthDefinition, YearDefinition};
use crate::drawing::Color;
use crate::error::{Error, Result};
use crate::font::Font;
use crate::holidays::{self, BankHolidaysFile, Division, HolidaySource};
use crate::names::NameTable;
use crate::options::{MonthOptions, YearOptions};
use crate::page::{Margins, PageSize};
use crate::style::{CornerMode, DeadBoxMode, LiveBoxMode, RowMode};

pub const CONFIG_PATH_ENV_VAR: &str = "WALLCAL_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> io::Result<Vec<PathBuf>> {
    let config_env: Option<PathBuf> = env::var(CONFIG_PATH_ENV_VAR).ok().map(PathBuf::from);

    let home = dirs::home_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Unable to find home directory"))?;

    let home_config = PathBuf::from_iter([&home, &PathBuf::from(".wallcal.toml")].iter());

    let config_xdg = dirs::config_dir()
        .unwrap_or_else(|| home.join(".config"))
        .join("wallcal")
        .join("config.toml");

    let mut locations = vec![config_xdg, home_config];

    if let Some(path) = config_env {
        locations.insert(0, path);
    }

    Ok(locations)
}

/// Loads the configuration from `path`, or from the first existing default
/// location. Falls back to the built-in defaults if there is none.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    let locations = find_configfile_locations()?;
    log::debug!(
        "Looking for config in {}",
        locations.iter().map(|p| p.display()).join(", ")
    );

    match first_config_file(&locations) {
        Some(path) => Config::from_file(path),
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// First location that is a regular file. Locations that exist but cannot
/// be read as a file are reported and skipped.
fn first_config_file(locations: &[PathBuf]) -> Option<&PathBuf> {
    locations.iter().find(|p| {
        if p.is_file() {
            true
        } else {
            if p.exists() {
                log::warn!("Skipping config location {}: not a file", p.display());
            }
            false
        }
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageSection {
    pub size: Option<PageSize>,
    pub margins: Option<Margins>,
    pub draw_margin: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MonthSection {
    pub first_day_of_week: Option<Weekday>,
    pub rows: Option<RowMode>,
    pub dead_boxes: Option<DeadBoxMode>,
    pub live_boxes: Option<LiveBoxMode>,
    pub corners: Option<CornerMode>,
    pub draw_outline_box: Option<bool>,
    pub draw_month: Option<bool>,
    pub draw_year: Option<bool>,
    pub abbreviate_day_names: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct YearSection {
    pub first_day_of_week: Option<Weekday>,
    pub header_background: Option<Color>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FontSection {
    pub day_names: Option<Font>,
    pub numbers: Option<Font>,
    pub month: Option<Font>,
    pub year: Option<Font>,
    pub holiday: Option<Font>,
    pub occasion: Option<Font>,
    pub year_month_names: Option<Font>,
    pub year_day_initials: Option<Font>,
    pub year_numbers: Option<Font>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OccasionEntry {
    pub date: NaiveDate,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HolidaySection {
    pub file: PathBuf,
    #[serde(default)]
    pub division: Division,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub page: PageSection,
    pub month: MonthSection,
    pub year: YearSection,
    pub fonts: FontSection,
    pub occasions: Vec<OccasionEntry>,
    pub holidays: Option<HolidaySection>,
    pub names: Option<NameTable>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        log::info!("Loading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        content.parse()
    }

    pub fn month_options(&self, month: MonthDefinition) -> Result<MonthOptions> {
        let mut options = MonthOptions::new(month);
        self.apply_page(&mut options.page_size, &mut options.margins);
        options.draw_margin = self.page.draw_margin;

        if let Some(names) = &self.names {
            options.names = names.clone();
        }

        let m = &self.month;
        set_if(&mut options.row_mode, m.rows);
        set_if(&mut options.dead_box_mode, m.dead_boxes);
        set_if(&mut options.live_box_mode, m.live_boxes);
        set_if(&mut options.corner_mode, m.corners);
        set_if(&mut options.draw_outline_box, m.draw_outline_box);
        set_if(&mut options.draw_month, m.draw_month);
        set_if(&mut options.draw_year, m.draw_year);
        set_if(&mut options.abbreviate_day_names, m.abbreviate_day_names);

        let f = &self.fonts;
        set_if(&mut options.day_names_font, f.day_names.clone());
        set_if(&mut options.numbers_font, f.numbers.clone());
        set_if(&mut options.month_font, f.month.clone());
        set_if(&mut options.year_font, f.year.clone());
        set_if(&mut options.holiday_font, f.holiday.clone());
        set_if(&mut options.occasion_font, f.occasion.clone());

        options.validate()?;
        Ok(options)
    }

    pub fn year_options(&self, year: YearDefinition) -> Result<YearOptions> {
        let mut options = YearOptions::new(year);
        self.apply_page(&mut options.page_size, &mut options.margins);
        options.draw_margin = self.page.draw_margin;

        if let Some(names) = &self.names {
            options.names = names.clone();
        }

        set_if(
            &mut options.month_header_background,
            self.year.header_background,
        );

        let f = &self.fonts;
        set_if(&mut options.month_names_font, f.year_month_names.clone());
        set_if(&mut options.day_initials_font, f.year_day_initials.clone());
        set_if(&mut options.numbers_font, f.year_numbers.clone());

        options.validate()?;
        Ok(options)
    }

    /// First day of the week for month pages unless overridden on the command line.
    pub fn month_first_day(&self) -> Weekday {
        self.month.first_day_of_week.unwrap_or(Weekday::Mon)
    }

    pub fn year_first_day(&self) -> Weekday {
        self.year.first_day_of_week.unwrap_or(Weekday::Mon)
    }

    pub fn holiday_source(&self) -> Option<BankHolidaysFile> {
        self.holidays
            .as_ref()
            .map(|h| BankHolidaysFile::new(&h.file, h.division))
    }

    /// Holidays and configured occasions falling into `month`, in that order.
    pub fn annotations(&self, options: &MonthOptions) -> Vec<Annotation> {
        let month = &options.month;

        let holidays = match self.holiday_source() {
            Some(source) => month_holidays(&source, month),
            None => Vec::new(),
        };

        let occasions = self
            .occasions
            .iter()
            .filter(|o| month.contains(&o.date))
            .map(|o| Annotation::new(o.date, o.title.as_str()).font(options.occasion_font.clone()));

        holidays::to_annotations(&holidays, &options.holiday_font)
            .into_iter()
            .chain(occasions)
            .collect()
    }

    fn apply_page(&self, size: &mut PageSize, margins: &mut Margins) {
        set_if(size, self.page.size);
        set_if(margins, self.page.margins);
    }
}

fn month_holidays(source: &dyn HolidaySource, month: &MonthDefinition) -> Vec<holidays::Holiday> {
    holidays::holidays_or_empty(source, month.year)
        .into_iter()
        .filter(|h| month.contains(&h.date))
        .collect()
}

fn set_if<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

impl std::str::FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Config> {
        Ok(toml::from_str(s)?)
    }
}
