pub mod calendar;
pub mod config;
pub mod drawing;
pub mod error;
pub mod font;
pub mod holidays;
pub mod layout;
pub mod names;
pub mod options;
pub mod page;
pub mod style;
pub mod units;

pub use calendar::{Annotation, MonthDefinition, YearDefinition};
pub use drawing::{Drawing, DrawingSink, SvgFile, SvgWriter};
pub use error::{Error, ErrorKind, Result};
pub use layout::{CalendarLayout, MonthCalendar, YearCalendar};
pub use options::{MonthOptions, YearOptions};
