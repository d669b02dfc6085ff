use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::drawing::{Color, Drawing, Node, Rect, Stroke};
use crate::error::{Error, Result};
use crate::units;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum PageSize {
    A3,
    A4,
    A5,
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

impl PageSize {
    /// Landscape dimensions as `(height, width)` in millimetres.
    pub fn landscape_mm(&self) -> (f64, f64) {
        match self {
            PageSize::A3 => (297.0, 420.0),
            PageSize::A4 => (210.0, 297.0),
            PageSize::A5 => (148.5, 210.0),
        }
    }
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "a3" => Ok(PageSize::A3),
            "a4" => Ok(PageSize::A4),
            "a5" => Ok(PageSize::A5),
            _ => Err(Error::config(&format!("Unsupported page size '{}'", s))),
        }
    }
}

impl std::convert::TryFrom<String> for PageSize {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::A3 => write!(f, "A3"),
            PageSize::A4 => write!(f, "A4"),
            PageSize::A5 => write!(f, "A5"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margins {
    pub const MAX_MM: f64 = 50.0;

    pub fn uniform(mm: f64) -> Self {
        Margins {
            left: mm,
            top: mm,
            right: mm,
            bottom: mm,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ] {
            if !(0.0..=Self::MAX_MM).contains(&value) {
                return Err(Error::config(&format!(
                    "{} margin must be between 0 and {} mm, got {}",
                    name,
                    Self::MAX_MM,
                    value
                )));
            }
        }
        Ok(())
    }
}

impl Default for Margins {
    fn default() -> Self {
        Margins::uniform(12.0)
    }
}

/// Physical page with its margins. Both layout engines start from here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

impl Page {
    pub fn new(size: PageSize, margins: Margins) -> Self {
        let (height, width) = size.landscape_mm();
        Page {
            width,
            height,
            margins,
        }
    }

    pub fn usable_width(&self) -> f64 {
        self.width - self.margins.left - self.margins.right
    }

    pub fn usable_height(&self) -> f64 {
        self.height - self.margins.top - self.margins.bottom
    }

    /// Empty drawing of the page size, optionally carrying the margin guide.
    pub fn scaffold(&self, draw_margin: bool) -> Drawing {
        let mut drawing = Drawing::new(self.width, self.height);

        if draw_margin {
            drawing.push(Node::Rect(
                Rect::new(
                    self.margins.left,
                    self.margins.top,
                    self.usable_width(),
                    self.usable_height(),
                )
                .id("MarginGuide")
                .no_fill()
                .stroke(Stroke::new(Color::DEEP_SKY_BLUE, units::pixels_to_mm(1.0))),
            ));
        }

        drawing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_sizes_are_exact() {
        assert_eq!(PageSize::A3.landscape_mm(), (297.0, 420.0));
        assert_eq!(PageSize::A4.landscape_mm(), (210.0, 297.0));
        assert_eq!(PageSize::A5.landscape_mm(), (148.5, 210.0));

        let page = Page::new(PageSize::A4, Margins::default());
        assert_eq!(page.width, 297.0);
        assert_eq!(page.height, 210.0);
        assert_eq!(page.usable_width(), 273.0);
        assert_eq!(page.usable_height(), 186.0);
    }

    #[test]
    fn unknown_page_size_is_rejected() {
        assert_eq!("a5".parse::<PageSize>().unwrap(), PageSize::A5);
        assert!("A6".parse::<PageSize>().unwrap_err().is_configuration());
    }

    #[test]
    fn margin_guide_is_optional() {
        let page = Page::new(PageSize::A3, Margins::uniform(10.0));
        assert!(page.scaffold(false).children.is_empty());

        let drawing = page.scaffold(true);
        assert_eq!(drawing.children.len(), 1);
        match &drawing.children[0] {
            Node::Rect(rect) => {
                assert_eq!((rect.x, rect.y), (10.0, 10.0));
                assert_eq!((rect.width, rect.height), (400.0, 277.0));
                assert!(rect.fill.is_none());
            }
            _ => panic!("margin guide should be a rectangle"),
        }
    }

    #[test]
    fn margins_are_bounded() {
        assert!(Margins::uniform(0.0).validate().is_ok());
        assert!(Margins::uniform(50.0).validate().is_ok());

        let mut margins = Margins::default();
        margins.bottom = 51.0;
        assert!(margins.validate().unwrap_err().is_configuration());
        margins.bottom = -1.0;
        assert!(margins.validate().is_err());
    }
}
