use chrono::Datelike;
use std::collections::HashMap;

use crate::drawing::{
    Color, Drawing, Group, Line, Node, Rect, Stroke, Text, TextAnchor, TextSpan,
};
use crate::error::{Error, Result};
use crate::layout::grid::{DayBox, DayGrid, DaySlot, Region, COLUMNS};
use crate::layout::CalendarLayout;
use crate::options::MonthOptions;
use crate::page::Page;
use crate::style::{CellGeometry, DeadBoxTreatment};
use crate::units;

const BOX_STROKE_MM: f64 = 0.2;
/// Gap between the day-name baseline and the top of the grid, in day-name lines.
const DAY_NAME_DESCENT: f64 = 0.2;

/// Single month as a grid of day boxes under a month/year header.
#[derive(Debug, Clone)]
pub struct MonthCalendar {
    options: MonthOptions,
}

/// Resolved frame of the day grid on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl MonthCalendar {
    pub fn new(options: MonthOptions) -> Result<Self> {
        options.validate()?;
        Ok(MonthCalendar { options })
    }

    pub fn options(&self) -> &MonthOptions {
        &self.options
    }

    fn page(&self) -> Page {
        Page::new(self.options.page_size, self.options.margins)
    }

    fn day_name_height(&self) -> f64 {
        self.options.day_names_font.line_height_mm()
    }

    /// Largest point size among the header parts that are drawn.
    fn header_point_size(&self) -> f64 {
        let opts = &self.options;
        let month = if opts.draw_month {
            opts.month_font.point_size
        } else {
            0.0
        };
        let year = if opts.draw_year {
            opts.year_font.point_size
        } else {
            0.0
        };
        month.max(year)
    }

    fn header_height(&self) -> f64 {
        2.0 * units::points_to_mm(self.header_point_size())
    }

    pub fn frame(&self) -> Result<GridFrame> {
        let page = self.page();
        let allowance = self.day_name_height() + self.header_height();
        let width = page.usable_width();
        let height = page.usable_height() - allowance;

        if width <= 0.0 || height <= 0.0 {
            return Err(Error::config(
                "Margins and header fonts leave no room for the day grid",
            ));
        }

        Ok(GridFrame {
            x: page.margins.left,
            y: page.margins.top + allowance,
            width,
            height,
            cell_width: width / COLUMNS as f64,
            cell_height: height / self.options.row_mode.count() as f64,
        })
    }

    fn cell(&self, frame: &GridFrame, cell: &DayBox) -> CellGeometry {
        self.options.corner_mode.resolve_cell(
            frame.x + cell.column as f64 * frame.cell_width,
            frame.y + cell.row as f64 * frame.cell_height,
            frame.cell_width,
            frame.cell_height,
        )
    }

    /// Distance of labels from the box border: the unmerged inter-cell margin
    /// plus the corner inset.
    fn text_padding(&self, frame: &GridFrame, geometry: &CellGeometry) -> f64 {
        frame.cell_height / 20.0 + self.options.corner_mode.text_inset(geometry.width)
    }

    /// Bottom edge of the part of a box a label sits in.
    fn region_bottom(geometry: &CellGeometry, region: Region) -> f64 {
        match region {
            Region::Whole | Region::Lower => geometry.y + geometry.height,
            Region::Upper => geometry.y + geometry.height / 2.0,
        }
    }

    fn outline_box(&self, frame: &GridFrame) -> Rect {
        Rect::new(frame.x, frame.y, frame.width, frame.height)
            .id("OutlineBox")
            .fill(Color::DEEP_SKY_BLUE)
    }

    fn day_boxes(&self, frame: &GridFrame, grid: &DayGrid) -> Vec<Rect> {
        let corner_mode = self.options.corner_mode;

        grid.boxes()
            .iter()
            .map(|cell| {
                let geometry = self.cell(frame, cell);
                // Only live boxes get rounded corners.
                let radius = if cell.is_live() {
                    corner_mode.corner_radius(geometry.width)
                } else {
                    0.0
                };
                Rect::new(geometry.x, geometry.y, geometry.width, geometry.height)
                    .id(format!("Box{}", cell.index() + 1))
                    .fill(Color::WHITE)
                    .stroke(Stroke::new(Color::BLACK, BOX_STROKE_MM))
                    .corner_radius(radius)
            })
            .collect()
    }

    /// Applies live and dead box visibility once geometry is final.
    fn style_boxes(&self, rects: &mut [Rect], grid: &DayGrid) {
        let live_opacity = self.options.live_box_mode.opacity();
        let dead = self.options.dead_box_mode.treatment();

        for (rect, cell) in rects.iter_mut().zip(grid.boxes()) {
            if cell.is_live() {
                rect.opacity = live_opacity;
            } else {
                match dead {
                    DeadBoxTreatment::Untouched => {}
                    DeadBoxTreatment::Hidden => rect.hidden = true,
                    DeadBoxTreatment::Opacity(opacity) => rect.opacity = Some(opacity),
                }
            }
        }
    }

    fn month_and_year(&self) -> Option<Text> {
        let opts = &self.options;
        if !opts.draw_month && !opts.draw_year {
            return None;
        }

        let mut spans = Vec::new();
        if opts.draw_month {
            let separator = if opts.draw_year { " " } else { "" };
            spans.push(
                TextSpan::new(
                    format!("{}{}", opts.names.month(opts.month.month), separator),
                    &opts.month_font,
                )
                .id("MonthName"),
            );
        }
        if opts.draw_year {
            spans.push(TextSpan::new(opts.month.year.to_string(), &opts.year_font).id("Year"));
        }

        let page = self.page();
        let x = page.margins.left + page.usable_width() / 2.0;
        let y = page.margins.top + units::points_to_mm(self.header_point_size());

        Some(
            Text::from_spans(spans, x, y)
                .id("MonthAndYear")
                .anchor(TextAnchor::Middle),
        )
    }

    fn day_names(&self, frame: &GridFrame) -> Group {
        let opts = &self.options;
        let mut group = Group::new("DayNameGroup");
        let y = frame.y - DAY_NAME_DESCENT * self.day_name_height();

        for column in 0..COLUMNS {
            let weekday = opts.month.column_weekday(column);
            let name = if opts.abbreviate_day_names {
                opts.names.abbreviated_day(weekday)
            } else {
                opts.names.day(weekday)
            };
            let x = frame.x + (column as f64 + 0.5) * frame.cell_width;

            group.push(
                Text::new(name, &opts.day_names_font, x, y)
                    .id(format!("DayName{}", column))
                    .anchor(TextAnchor::Middle)
                    .into(),
            );
        }

        group
    }

    fn day_number(
        &self,
        frame: &GridFrame,
        geometry: &CellGeometry,
        day: u32,
        region: Region,
    ) -> Text {
        let padding = self.text_padding(frame, geometry);
        let x = geometry.x + geometry.width - padding;
        let y = Self::region_bottom(geometry, region) - padding;

        Text::new(day.to_string(), &self.options.numbers_font, x, y)
            .id(format!("DayNumber{}", day))
            .anchor(TextAnchor::End)
    }

    fn centre_line(&self, geometry: &CellGeometry, day: u32) -> Line {
        let y = geometry.y + geometry.height / 2.0;
        let mut line = Line::new(
            geometry.x,
            y,
            geometry.x + geometry.width,
            y,
            Stroke::new(Color::BLACK, BOX_STROKE_MM),
        );
        line.id = Some(format!("OverflowLine{}", day));
        line.opacity = self.options.live_box_mode.opacity();
        line
    }

    fn day_numbers(&self, frame: &GridFrame, grid: &DayGrid) -> Result<(Group, Vec<Line>)> {
        let mut group = Group::new("DayNumberGroup");
        let mut lines = Vec::new();

        for cell in grid.live() {
            let geometry = self.cell(frame, cell);
            let region = if cell.is_split() {
                Region::Upper
            } else {
                Region::Whole
            };
            group.push(
                self.day_number(frame, &geometry, cell.day_number()?, region)
                    .into(),
            );
        }

        for cell in grid.overflow() {
            let geometry = self.cell(frame, cell);
            if let Some(day) = cell.overflow_day {
                group.push(self.day_number(frame, &geometry, day, Region::Lower).into());
                lines.push(self.centre_line(&geometry, day));
            }
        }

        Ok((group, lines))
    }

    fn annotations(
        &self,
        frame: &GridFrame,
        grid: &DayGrid,
        slots: &HashMap<u32, DaySlot>,
    ) -> Group {
        let opts = &self.options;
        let mut group = Group::new("OccasionGroup");

        for (i, annotation) in opts.annotations.iter().enumerate() {
            if annotation.title.trim().is_empty() {
                continue;
            }
            if !opts.month.contains(&annotation.date) {
                log::warn!(
                    "'{}' on {} is outside {}-{:02}, skipping",
                    annotation.title,
                    annotation.date,
                    opts.month.year,
                    opts.month.month
                );
                continue;
            }

            let slot = match slots.get(&annotation.date.day()) {
                Some(slot) => slot,
                None => {
                    log::warn!(
                        "No box for '{}' on {}, skipping",
                        annotation.title,
                        annotation.date
                    );
                    continue;
                }
            };

            let geometry = self.cell(frame, &grid.boxes()[slot.index]);
            let padding = self.text_padding(frame, &geometry);
            let x = geometry.x + padding;
            let y = Self::region_bottom(&geometry, slot.region) - padding;

            group.push(
                Text::new(annotation.title.as_str(), &annotation.font, x, y)
                    .id(format!("Occasion{}", i))
                    .anchor(TextAnchor::Start)
                    .into(),
            );
        }

        group
    }
}

impl CalendarLayout for MonthCalendar {
    fn generate(&self) -> Result<Drawing> {
        let opts = &self.options;
        let frame = self.frame()?;
        let grid = DayGrid::assign(&opts.month, opts.row_mode.count())?;
        let slots = grid.slots()?;

        log::debug!(
            "Laying out {}-{:02}: {} rows, cells {:.2}x{:.2} mm",
            opts.month.year,
            opts.month.month,
            grid.rows(),
            frame.cell_width,
            frame.cell_height
        );

        let mut drawing = self.page().scaffold(opts.draw_margin);

        if opts.draw_outline_box {
            drawing.push(self.outline_box(&frame));
        }

        let mut rects = self.day_boxes(&frame, &grid);
        self.style_boxes(&mut rects, &grid);
        let mut boxes = Group::new("BoxGroup");
        boxes.children = rects.into_iter().map(Node::Rect).collect();
        drawing.push(boxes);

        if let Some(header) = self.month_and_year() {
            drawing.push(header);
        }

        drawing.push(self.day_names(&frame));

        let (numbers, lines) = self.day_numbers(&frame, &grid)?;
        drawing.push(numbers);
        for line in lines {
            drawing.push(line);
        }

        drawing.push(self.annotations(&frame, &grid, &slots));

        Ok(drawing)
    }
}
