use serde::Deserialize;

use crate::drawing::Color;
use crate::units;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
    W100,
    W200,
    W300,
    W400,
    W500,
    W600,
    W700,
    W800,
    W900,
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::Normal
    }
}

impl FontWeight {
    /// Numeric CSS weight. Normal and bold map to 400 and 700.
    pub fn css_value(&self) -> &'static str {
        match self {
            FontWeight::Normal => "400",
            FontWeight::Bold => "700",
            FontWeight::W100 => "100",
            FontWeight::W200 => "200",
            FontWeight::W300 => "300",
            FontWeight::W400 => "400",
            FontWeight::W500 => "500",
            FontWeight::W600 => "600",
            FontWeight::W700 => "700",
            FontWeight::W800 => "800",
            FontWeight::W900 => "900",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Font {
    pub family: String,
    #[serde(rename = "size")]
    pub point_size: f64,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub color: Color,
}

impl Font {
    pub fn new<S: Into<String>>(family: S, point_size: f64) -> Self {
        Font {
            family: family.into(),
            point_size,
            weight: FontWeight::Normal,
            italic: false,
            color: Color::BLACK,
        }
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn bold(self) -> Self {
        self.weight(FontWeight::Bold)
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Height of one line of this font in millimetres.
    pub fn line_height_mm(&self) -> f64 {
        units::points_to_mm(self.point_size)
    }

    pub(crate) fn validate(&self, name: &str) -> crate::error::Result<()> {
        if self.point_size > 0.0 && self.point_size.is_finite() {
            Ok(())
        } else {
            Err(crate::error::Error::config(&format!(
                "{} font size must be positive, got {}",
                name, self.point_size
            )))
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::new("Arial", 12.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_deserializes_with_defaults() {
        let font: Font = toml::from_str(
            r#"
            family = "Calibri"
            size = 14.0
            "#,
        )
        .unwrap();
        assert_eq!(font, Font::new("Calibri", 14.0));

        let font: Font = toml::from_str(
            r##"
            family = "Georgia"
            size = 9.5
            weight = "w600"
            italic = true
            color = "#102030"
            "##,
        )
        .unwrap();
        assert_eq!(font.weight.css_value(), "600");
        assert!(font.italic);
        assert_eq!(font.color, Color::rgb(0x10, 0x20, 0x30));
    }

    #[test]
    fn non_positive_size_is_rejected() {
        assert!(Font::new("Arial", 0.0).validate("numbers").is_err());
        assert!(Font::new("Arial", 7.0).validate("numbers").is_ok());
    }
}
