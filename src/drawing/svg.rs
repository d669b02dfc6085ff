//! SVG serialisation of a [`Drawing`]. Coordinates are written in millimetres
//! against a `viewBox` of the page size.

use std::fmt::{self, Write as FmtWrite};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{Drawing, DrawingSink, Group, Line, Node, Rect, Stroke, Text, TextSpan};
use crate::error::Result;
use crate::font::Font;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shortest decimal form, trimmed of trailing zeros.
fn num(value: f64) -> String {
    let s = format!("{:.4}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_owned()
    } else {
        s.to_owned()
    }
}

fn id_attr(out: &mut String, id: &Option<String>) -> fmt::Result {
    if let Some(id) = id {
        write!(out, " id=\"{}\"", escape(id))?;
    }
    Ok(())
}

fn opacity_attr(out: &mut String, opacity: Option<f64>) -> fmt::Result {
    if let Some(opacity) = opacity {
        write!(out, " opacity=\"{}\"", num(opacity))?;
    }
    Ok(())
}

fn stroke_attrs(out: &mut String, stroke: &Option<Stroke>) -> fmt::Result {
    match stroke {
        Some(stroke) => write!(
            out,
            " stroke=\"{}\" stroke-width=\"{}\"",
            stroke.color,
            num(stroke.width)
        ),
        None => Ok(()),
    }
}

fn font_attrs(out: &mut String, font: &Font) -> fmt::Result {
    write!(
        out,
        " font-family=\"{}\" font-size=\"{}pt\" font-weight=\"{}\" fill=\"{}\"",
        escape(&font.family),
        num(font.point_size),
        font.weight.css_value(),
        font.color
    )?;
    if font.italic {
        out.push_str(" font-style=\"italic\"");
    }
    Ok(())
}

fn write_rect(out: &mut String, rect: &Rect) -> fmt::Result {
    out.push_str("<rect");
    id_attr(out, &rect.id)?;
    write!(
        out,
        " x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
        num(rect.x),
        num(rect.y),
        num(rect.width),
        num(rect.height)
    )?;
    if rect.corner_radius > 0.0 {
        let r = num(rect.corner_radius);
        write!(out, " rx=\"{}\" ry=\"{}\"", r, r)?;
    }
    match rect.fill {
        Some(color) => write!(out, " fill=\"{}\"", color)?,
        None => out.push_str(" fill=\"none\""),
    }
    stroke_attrs(out, &rect.stroke)?;
    opacity_attr(out, rect.opacity)?;
    if rect.hidden {
        out.push_str(" display=\"none\"");
    }
    out.push_str("/>\n");
    Ok(())
}

fn write_span(out: &mut String, span: &TextSpan) -> fmt::Result {
    out.push_str("<tspan");
    id_attr(out, &span.id)?;
    font_attrs(out, &span.font)?;
    write!(out, ">{}</tspan>", escape(&span.text))
}

fn write_text(out: &mut String, text: &Text) -> fmt::Result {
    out.push_str("<text");
    id_attr(out, &text.id)?;
    write!(
        out,
        " x=\"{}\" y=\"{}\" text-anchor=\"{}\"",
        num(text.x),
        num(text.y),
        text.anchor.as_str()
    )?;

    if let [span] = text.spans.as_slice() {
        font_attrs(out, &span.font)?;
        write!(out, ">{}</text>\n", escape(&span.text))
    } else {
        out.push('>');
        for span in &text.spans {
            write_span(out, span)?;
        }
        out.push_str("</text>\n");
        Ok(())
    }
}

fn write_line(out: &mut String, line: &Line) -> fmt::Result {
    out.push_str("<line");
    id_attr(out, &line.id)?;
    write!(
        out,
        " x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
        num(line.x1),
        num(line.y1),
        num(line.x2),
        num(line.y2)
    )?;
    stroke_attrs(out, &Some(line.stroke))?;
    opacity_attr(out, line.opacity)?;
    out.push_str("/>\n");
    Ok(())
}

fn write_group(out: &mut String, group: &Group) -> fmt::Result {
    out.push_str("<g");
    id_attr(out, &group.id)?;
    out.push_str(">\n");
    for child in &group.children {
        write_node(out, child)?;
    }
    out.push_str("</g>\n");
    Ok(())
}

fn write_node(out: &mut String, node: &Node) -> fmt::Result {
    match node {
        Node::Rect(rect) => write_rect(out, rect),
        Node::Text(text) => write_text(out, text),
        Node::Line(line) => write_line(out, line),
        Node::Group(group) => write_group(out, group),
    }
}

/// Renders the whole drawing as an SVG document.
pub fn to_svg_string(drawing: &Drawing) -> Result<String> {
    let mut out = String::new();
    write_document(&mut out, drawing)?;
    Ok(out)
}

fn write_document(out: &mut String, drawing: &Drawing) -> fmt::Result {
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" \
         width=\"{w}mm\" height=\"{h}mm\" viewBox=\"0 0 {w} {h}\">\n",
        w = num(drawing.width),
        h = num(drawing.height)
    )?;
    for node in &drawing.children {
        write_node(out, node)?;
    }
    out.push_str("</svg>\n");
    Ok(())
}

/// Writes drawings as SVG to any byte stream.
pub struct SvgWriter<W: Write> {
    inner: W,
    bom: bool,
}

impl<W: Write> SvgWriter<W> {
    pub fn new(inner: W) -> Self {
        SvgWriter { inner, bom: false }
    }

    pub fn with_bom(mut self, bom: bool) -> Self {
        self.bom = bom;
        self
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> DrawingSink for SvgWriter<W> {
    fn write_drawing(&mut self, drawing: &Drawing) -> Result<()> {
        if self.bom {
            self.inner.write_all(UTF8_BOM)?;
        }
        let svg = to_svg_string(drawing)?;
        self.inner.write_all(svg.as_bytes())?;
        self.inner.flush()?;
        Ok(())
    }
}

/// Writes drawings to an SVG file, replacing any previous content.
pub struct SvgFile {
    path: PathBuf,
    bom: bool,
}

impl SvgFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        SvgFile {
            path: path.as_ref().to_owned(),
            bom: true,
        }
    }

    pub fn with_bom(mut self, bom: bool) -> Self {
        self.bom = bom;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DrawingSink for SvgFile {
    fn write_drawing(&mut self, drawing: &Drawing) -> Result<()> {
        let file = File::create(&self.path)?;
        SvgWriter::new(BufWriter::new(file))
            .with_bom(self.bom)
            .write_drawing(drawing)?;
        log::info!("Wrote {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::{Color, TextAnchor};

    fn sample() -> Drawing {
        let mut drawing = Drawing::new(297.0, 210.0);
        let mut group = Group::new("BoxGroup");
        let mut rect = Rect::new(12.0, 20.5, 30.0, 25.0)
            .id("Box1")
            .fill(Color::WHITE)
            .stroke(Stroke::new(Color::BLACK, 0.2))
            .corner_radius(1.875);
        rect.hidden = true;
        group.push(rect.into());
        drawing.push(group);
        drawing.push(
            Text::new("Fish & Chips", &Font::new("Arial", 7.0), 14.0, 44.0)
                .id("Occasion0")
                .anchor(TextAnchor::Start),
        );
        drawing
    }

    #[test]
    fn svg_document_structure() {
        let svg = to_svg_string(&sample()).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("width=\"297mm\" height=\"210mm\" viewBox=\"0 0 297 210\""));
        assert!(svg.contains("<g id=\"BoxGroup\">"));
        assert!(svg.contains(
            "<rect id=\"Box1\" x=\"12\" y=\"20.5\" width=\"30\" height=\"25\" \
             rx=\"1.875\" ry=\"1.875\" fill=\"#ffffff\" stroke=\"#000000\" \
             stroke-width=\"0.2\" display=\"none\"/>"
        ));
        assert!(svg.contains(">Fish &amp; Chips</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn multi_span_text_uses_tspans() {
        let mut drawing = Drawing::new(10.0, 10.0);
        drawing.push(Text::from_spans(
            vec![
                TextSpan::new("May ", &Font::new("Arial", 22.0)).id("MonthName"),
                TextSpan::new("2024", &Font::new("Arial", 22.0).bold()).id("Year"),
            ],
            5.0,
            5.0,
        ));
        let svg = to_svg_string(&drawing).unwrap();
        assert!(svg.contains("<tspan id=\"MonthName\""));
        assert!(svg.contains("font-weight=\"700\" fill=\"#000000\">2024</tspan>"));
    }

    #[test]
    fn writer_prefixes_bom_on_request() {
        let mut writer = SvgWriter::new(Vec::new()).with_bom(true);
        writer.write_drawing(&sample()).unwrap();
        let bytes = writer.into_inner();
        assert!(bytes.starts_with(UTF8_BOM));

        let mut writer = SvgWriter::new(Vec::new());
        writer.write_drawing(&sample()).unwrap();
        assert!(writer.into_inner().starts_with(b"<?xml"));
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(4.375), "4.375");
        assert_eq!(num(1.0 / 3.0), "0.3333");
        assert_eq!(num(-0.00001), "0");
    }
}
