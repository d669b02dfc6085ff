//! Output tree of vector primitives. All geometry is in millimetres.

pub mod svg;

use phf::phf_map;
use serde_with::DeserializeFromStr;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::font::Font;

pub use svg::{SvgFile, SvgWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeFromStr)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

static NAMED_COLORS: phf::Map<&'static str, Color> = phf_map! {
    "black" => Color::BLACK,
    "white" => Color::WHITE,
    "darkgray" => Color::DARK_GRAY,
    "darkgrey" => Color::DARK_GRAY,
    "gray" => Color::rgb(128, 128, 128),
    "grey" => Color::rgb(128, 128, 128),
    "lightgray" => Color::rgb(211, 211, 211),
    "deepskyblue" => Color::DEEP_SKY_BLUE,
    "steelblue" => Color::rgb(70, 130, 180),
    "navy" => Color::rgb(0, 0, 128),
    "red" => Color::rgb(255, 0, 0),
    "darkred" => Color::rgb(139, 0, 0),
    "green" => Color::rgb(0, 128, 0),
    "orange" => Color::rgb(255, 165, 0),
};

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const DARK_GRAY: Color = Color::rgb(169, 169, 169);
    pub const DEEP_SKY_BLUE: Color = Color::rgb(0, 191, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::config(&format!("Unknown color '{}'", s));

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
        } else {
            NAMED_COLORS
                .get(s.to_lowercase().as_str())
                .copied()
                .ok_or_else(invalid)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Stroke { color, width }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub id: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
    pub opacity: Option<f64>,
    pub hidden: bool,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            id: None,
            x,
            y,
            width,
            height,
            corner_radius: 0.0,
            fill: None,
            stroke: None,
            opacity: None,
            hidden: false,
        }
    }

    pub fn id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn no_fill(mut self) -> Self {
        self.fill = None;
        self
    }

    pub fn stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub id: Option<String>,
    pub text: String,
    pub font: Font,
}

impl TextSpan {
    pub fn new<S: Into<String>>(text: S, font: &Font) -> Self {
        TextSpan {
            id: None,
            text: text.into(),
            font: font.clone(),
        }
    }

    pub fn id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Single-line text run positioned by its baseline anchor point.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub id: Option<String>,
    pub x: f64,
    pub y: f64,
    pub anchor: TextAnchor,
    pub spans: Vec<TextSpan>,
}

impl Text {
    pub fn new<S: Into<String>>(text: S, font: &Font, x: f64, y: f64) -> Self {
        Text::from_spans(vec![TextSpan::new(text, font)], x, y)
    }

    pub fn from_spans(spans: Vec<TextSpan>, x: f64, y: f64) -> Self {
        Text {
            id: None,
            x,
            y,
            anchor: TextAnchor::Start,
            spans,
        }
    }

    pub fn id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn content(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: Option<String>,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Stroke,
    pub opacity: Option<f64>,
}

impl Line {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke) -> Self {
        Line {
            id: None,
            x1,
            y1,
            x2,
            y2,
            stroke,
            opacity: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub id: Option<String>,
    pub children: Vec<Node>,
}

impl Group {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Group {
            id: Some(id.into()),
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Rect(Rect),
    Text(Text),
    Line(Line),
    Group(Group),
}

impl Node {
    pub fn id(&self) -> Option<&str> {
        match self {
            Node::Rect(r) => r.id.as_deref(),
            Node::Text(t) => t.id.as_deref(),
            Node::Line(l) => l.id.as_deref(),
            Node::Group(g) => g.id.as_deref(),
        }
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(self);
        if let Node::Group(group) = self {
            for child in &group.children {
                child.collect(out);
            }
        }
    }
}

impl From<Rect> for Node {
    fn from(rect: Rect) -> Self {
        Node::Rect(rect)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Line> for Node {
    fn from(line: Line) -> Self {
        Node::Line(line)
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub width: f64,
    pub height: f64,
    pub children: Vec<Node>,
}

impl Drawing {
    pub fn new(width: f64, height: f64) -> Self {
        Drawing {
            width,
            height,
            children: Vec::new(),
        }
    }

    pub fn push<N: Into<Node>>(&mut self, node: N) {
        self.children.push(node.into());
    }

    /// Depth-first, document-order list of every node in the tree.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        for child in &self.children {
            child.collect(&mut out);
        }
        out
    }

    pub fn find(&self, id: &str) -> Option<&Node> {
        self.nodes().into_iter().find(|node| node.id() == Some(id))
    }
}

/// Destination for a finished drawing.
pub trait DrawingSink {
    fn write_drawing(&mut self, drawing: &Drawing) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_parse_from_hex_and_names() {
        assert_eq!("#00bfff".parse::<Color>().unwrap(), Color::DEEP_SKY_BLUE);
        assert_eq!("DarkGray".parse::<Color>().unwrap(), Color::DARK_GRAY);
        assert_eq!(Color::rgb(1, 2, 255).to_string(), "#0102ff");
        assert!("#12345".parse::<Color>().is_err());
        assert!("chartreuse-ish".parse::<Color>().is_err());
    }

    #[test]
    fn nodes_are_listed_depth_first() {
        let mut drawing = Drawing::new(100.0, 50.0);
        let mut group = Group::new("Outer");
        group.push(Rect::new(0.0, 0.0, 1.0, 1.0).id("Inner").into());
        drawing.push(group);
        drawing.push(Text::new("x", &Font::default(), 1.0, 1.0).id("Label"));

        let ids: Vec<_> = drawing.nodes().iter().filter_map(|n| n.id()).collect();
        assert_eq!(ids, vec!["Outer", "Inner", "Label"]);
        assert!(matches!(drawing.find("Inner"), Some(Node::Rect(_))));
        assert!(drawing.find("Missing").is_none());
    }
}
