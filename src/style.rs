//! Lookup tables from the enumerated presentation modes to concrete geometry and
//! opacity. Unknown mode names never fall back to a default.

use serde::Deserialize;
use std::convert::TryFrom;
use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u32")]
pub enum RowMode {
    Five,
    Six,
}

impl RowMode {
    pub fn count(&self) -> usize {
        match self {
            RowMode::Five => 5,
            RowMode::Six => 6,
        }
    }
}

impl Default for RowMode {
    fn default() -> Self {
        RowMode::Six
    }
}

impl TryFrom<u32> for RowMode {
    type Error = Error;

    fn try_from(rows: u32) -> Result<Self> {
        match rows {
            5 => Ok(RowMode::Five),
            6 => Ok(RowMode::Six),
            _ => Err(Error::config(&format!(
                "Row count must be 5 or 6, got {}",
                rows
            ))),
        }
    }
}

impl FromStr for RowMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let rows = s
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::config(&format!("Invalid row mode '{}'", s)))?;
        RowMode::try_from(rows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum LiveBoxMode {
    Visible,
    Opacity5,
    Opacity10,
    Opacity25,
    Opacity50,
    Opacity75,
    Opacity85,
    Opacity95,
}

impl LiveBoxMode {
    /// `None` leaves the element fully opaque.
    pub fn opacity(&self) -> Option<f64> {
        match self {
            LiveBoxMode::Visible => None,
            LiveBoxMode::Opacity5 => Some(0.05),
            LiveBoxMode::Opacity10 => Some(0.10),
            LiveBoxMode::Opacity25 => Some(0.25),
            LiveBoxMode::Opacity50 => Some(0.50),
            LiveBoxMode::Opacity75 => Some(0.75),
            LiveBoxMode::Opacity85 => Some(0.85),
            LiveBoxMode::Opacity95 => Some(0.95),
        }
    }
}

impl Default for LiveBoxMode {
    fn default() -> Self {
        LiveBoxMode::Visible
    }
}

impl FromStr for LiveBoxMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "visible" => Ok(LiveBoxMode::Visible),
            "opacity5" => Ok(LiveBoxMode::Opacity5),
            "opacity10" => Ok(LiveBoxMode::Opacity10),
            "opacity25" => Ok(LiveBoxMode::Opacity25),
            "opacity50" => Ok(LiveBoxMode::Opacity50),
            "opacity75" => Ok(LiveBoxMode::Opacity75),
            "opacity85" => Ok(LiveBoxMode::Opacity85),
            "opacity95" => Ok(LiveBoxMode::Opacity95),
            _ => Err(Error::config(&format!("Unknown live box mode '{}'", s))),
        }
    }
}

impl TryFrom<String> for LiveBoxMode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeadBoxTreatment {
    Untouched,
    Hidden,
    Opacity(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum DeadBoxMode {
    Visible,
    Invisible,
    Opacity25,
    Opacity50,
    Opacity75,
}

impl DeadBoxMode {
    pub fn treatment(&self) -> DeadBoxTreatment {
        match self {
            DeadBoxMode::Visible => DeadBoxTreatment::Untouched,
            DeadBoxMode::Invisible => DeadBoxTreatment::Hidden,
            DeadBoxMode::Opacity25 => DeadBoxTreatment::Opacity(0.25),
            DeadBoxMode::Opacity50 => DeadBoxTreatment::Opacity(0.50),
            DeadBoxMode::Opacity75 => DeadBoxTreatment::Opacity(0.75),
        }
    }
}

impl Default for DeadBoxMode {
    fn default() -> Self {
        DeadBoxMode::Invisible
    }
}

impl FromStr for DeadBoxMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "visible" => Ok(DeadBoxMode::Visible),
            "invisible" => Ok(DeadBoxMode::Invisible),
            "opacity25" => Ok(DeadBoxMode::Opacity25),
            "opacity50" => Ok(DeadBoxMode::Opacity50),
            "opacity75" => Ok(DeadBoxMode::Opacity75),
            _ => Err(Error::config(&format!("Unknown dead box mode '{}'", s))),
        }
    }
}

impl TryFrom<String> for DeadBoxMode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum CornerMode {
    Normal,
    Merged,
    Rounded1,
    Rounded2,
    Rounded3,
    Rounded4,
}

impl CornerMode {
    /// Divisors of the box width: (corner radius, extra number inset).
    fn divisors(&self) -> Option<(f64, f64)> {
        match self {
            CornerMode::Normal | CornerMode::Merged => None,
            CornerMode::Rounded1 => Some((20.0, 60.0)),
            CornerMode::Rounded2 => Some((16.0, 50.0)),
            CornerMode::Rounded3 => Some((12.0, 40.0)),
            CornerMode::Rounded4 => Some((8.0, 30.0)),
        }
    }

    pub fn is_rounded(&self) -> bool {
        self.divisors().is_some()
    }

    pub fn is_merged(&self) -> bool {
        matches!(self, CornerMode::Merged)
    }

    pub fn corner_radius(&self, box_width: f64) -> f64 {
        self.divisors()
            .map_or(0.0, |(radius, _)| box_width / radius)
    }

    /// Extra distance keeping text clear of a rounded corner.
    pub fn text_inset(&self, box_width: f64) -> f64 {
        self.divisors().map_or(0.0, |(_, inset)| box_width / inset)
    }
}

impl Default for CornerMode {
    fn default() -> Self {
        CornerMode::Rounded2
    }
}

impl FromStr for CornerMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(CornerMode::Normal),
            "merged" | "merge" => Ok(CornerMode::Merged),
            "rounded1" => Ok(CornerMode::Rounded1),
            "rounded2" => Ok(CornerMode::Rounded2),
            "rounded3" => Ok(CornerMode::Rounded3),
            "rounded4" => Ok(CornerMode::Rounded4),
            _ => Err(Error::config(&format!("Unknown box corner mode '{}'", s))),
        }
    }
}

impl TryFrom<String> for CornerMode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Position and size of one grid cell after the inter-cell margin is resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Margin still separating this box from its neighbours; zero when merged.
    pub margin: f64,
}

impl CornerMode {
    /// Shrinks a raw cell by the inter-cell margin, or under `Merged` grows each
    /// box back out by half the margin so neighbours touch.
    pub fn resolve_cell(&self, x: f64, y: f64, width: f64, height: f64) -> CellGeometry {
        let margin = height / 20.0;

        if self.is_merged() {
            CellGeometry {
                x,
                y,
                width,
                height,
                margin: 0.0,
            }
        } else {
            CellGeometry {
                x: x + margin / 2.0,
                y: y + margin / 2.0,
                width: width - margin,
                height: height - margin,
                margin,
            }
        }
    }
}
