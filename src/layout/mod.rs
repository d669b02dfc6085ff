pub mod grid;
pub mod month;
pub mod year;

pub use grid::{DayBox, DayGrid};
pub use month::MonthCalendar;
pub use year::YearCalendar;

use crate::drawing::{Drawing, DrawingSink};
use crate::error::Result;

pub trait CalendarLayout {
    /// Produces a fresh drawing tree.
    fn generate(&self) -> Result<Drawing>;

    fn generate_into(&self, sink: &mut dyn DrawingSink) -> Result<()> {
        let drawing = self.generate()?;
        sink.write_drawing(&drawing)
    }
}
