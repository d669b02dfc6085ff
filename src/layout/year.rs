use chrono::Datelike;

use crate::calendar::{self, weekday_column};
use crate::drawing::{Color, Drawing, Group, Rect, Stroke, Text, TextAnchor};
use crate::error::{Error, Result};
use crate::layout::grid::COLUMNS;
use crate::layout::CalendarLayout;
use crate::options::YearOptions;
use crate::page::Page;
use crate::units;

const TILE_COLUMNS: usize = 4;
const TILE_ROWS: usize = 3;
const NOMINAL_GAP_MM: f64 = 5.0;
const NUMBER_ROWS: usize = 6;

// Fractions of the tile side.
const MONTH_NAME_BASELINE: f64 = 0.10;
const HEADER_BAR_HEIGHT: f64 = 0.15;
const DAY_INITIAL_BASELINE: f64 = 0.25;
const NUMBERS_HEIGHT: f64 = 0.70;

/// One square month tile of the year view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub month: u32,
    pub x: f64,
    pub y: f64,
    pub side: f64,
}

/// Twelve compact months tiled 4 x 3 on a single page.
#[derive(Debug, Clone)]
pub struct YearCalendar {
    options: YearOptions,
}

impl YearCalendar {
    pub fn new(options: YearOptions) -> Result<Self> {
        options.validate()?;
        Ok(YearCalendar { options })
    }

    pub fn options(&self) -> &YearOptions {
        &self.options
    }

    fn page(&self) -> Page {
        Page::new(self.options.page_size, self.options.margins)
    }

    /// Largest equal squares that fit with the nominal gaps, then spread so the
    /// tiling spans the whole usable area.
    pub fn tiles(&self) -> Result<Vec<Tile>> {
        let page = self.page();
        let width = page.usable_width();
        let height = page.usable_height();

        let max_width =
            (width - (TILE_COLUMNS - 1) as f64 * NOMINAL_GAP_MM) / TILE_COLUMNS as f64;
        let max_height = (height - (TILE_ROWS - 1) as f64 * NOMINAL_GAP_MM) / TILE_ROWS as f64;
        let side = max_width.min(max_height);

        if side <= 0.0 {
            return Err(Error::config("Margins leave no room for the year tiles"));
        }

        let gap_x = (width - TILE_COLUMNS as f64 * side) / (TILE_COLUMNS - 1) as f64;
        let gap_y = (height - TILE_ROWS as f64 * side) / (TILE_ROWS - 1) as f64;

        let tiles = (0..TILE_ROWS)
            .flat_map(|row| (0..TILE_COLUMNS).map(move |col| (row, col)))
            .map(|(row, col)| Tile {
                month: (row * TILE_COLUMNS + col + 1) as u32,
                x: page.margins.left + col as f64 * (side + gap_x),
                y: page.margins.top + row as f64 * (side + gap_y),
                side,
            })
            .collect();

        Ok(tiles)
    }

    fn month_tile(&self, tile: &Tile) -> Result<Group> {
        let opts = &self.options;
        let mut group = Group::new(format!("Month{}", tile.month));

        group.push(
            Rect::new(tile.x, tile.y, tile.side, tile.side)
                .id(format!("MonthBox{}", tile.month))
                .fill(Color::WHITE)
                .stroke(Stroke::new(
                    opts.month_header_background,
                    units::pixels_to_mm(0.5),
                ))
                .into(),
        );

        group.push(
            Rect::new(tile.x, tile.y, tile.side, tile.side * HEADER_BAR_HEIGHT)
                .id(format!("MonthHeader{}", tile.month))
                .fill(opts.month_header_background)
                .into(),
        );

        group.push(
            Text::new(
                opts.names.month(tile.month),
                &opts.month_names_font,
                tile.x + tile.side / 2.0,
                tile.y + tile.side * MONTH_NAME_BASELINE,
            )
            .id(format!("MonthName{}", tile.month))
            .anchor(TextAnchor::Middle)
            .into(),
        );

        let first = opts.year.first_day_of_week;
        let col_width = tile.side / COLUMNS as f64;
        let column_centre = |col: usize| tile.x + col as f64 * col_width + col_width / 2.0;

        for col in 0..COLUMNS {
            let weekday = calendar::column_weekday(first, col);
            group.push(
                Text::new(
                    opts.names.day_initial(weekday),
                    &opts.day_initials_font,
                    column_centre(col),
                    tile.y + tile.side * DAY_INITIAL_BASELINE,
                )
                .anchor(TextAnchor::Middle)
                .into(),
            );
        }

        let month = opts.year.month(tile.month);
        let start_col = weekday_column(first, month.first_date()?.weekday());
        let numbers_top = tile.y + tile.side * (1.0 - NUMBERS_HEIGHT);
        let row_height = tile.side * NUMBERS_HEIGHT / NUMBER_ROWS as f64;

        for date in calendar::dates_of_month(&month)? {
            let col = weekday_column(first, date.weekday());
            let row = (start_col + date.day0() as usize) / COLUMNS;
            debug_assert!(row < NUMBER_ROWS);

            group.push(
                Text::new(
                    date.day().to_string(),
                    &opts.numbers_font,
                    column_centre(col),
                    numbers_top + row as f64 * row_height + row_height / 2.0,
                )
                .id(format!("Month{}Day{}", tile.month, date.day()))
                .anchor(TextAnchor::Middle)
                .into(),
            );
        }

        Ok(group)
    }
}

impl CalendarLayout for YearCalendar {
    fn generate(&self) -> Result<Drawing> {
        let tiles = self.tiles()?;
        let mut drawing = self.page().scaffold(self.options.draw_margin);

        log::debug!(
            "Laying out year {}: tiles of {:.2} mm",
            self.options.year.year,
            tiles.first().map_or(0.0, |t| t.side)
        );

        for tile in &tiles {
            drawing.push(self.month_tile(tile)?);
        }

        Ok(drawing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::YearDefinition;
    use crate::drawing::Node;
    use crate::page::{Margins, PageSize};
    use crate::units::approx_eq;
    use chrono::Weekday;

    fn calendar(size: PageSize, margins: Margins, first: Weekday) -> YearCalendar {
        let mut options = YearOptions::new(YearDefinition::new(2024, first));
        options.page_size = size;
        options.margins = margins;
        YearCalendar::new(options).unwrap()
    }

    #[test]
    fn twelve_equal_squares_fill_the_page() {
        for &size in [PageSize::A3, PageSize::A4, PageSize::A5].iter() {
            let margins = Margins {
                left: 10.0,
                top: 15.0,
                right: 20.0,
                bottom: 5.0,
            };
            let cal = calendar(size, margins, Weekday::Mon);
            let page = Page::new(size, margins);
            let tiles = cal.tiles().unwrap();

            assert_eq!(tiles.len(), 12);
            let side = tiles[0].side;
            assert!(tiles.iter().all(|t| t.side == side));
            assert_eq!(
                tiles.iter().map(|t| t.month).collect::<Vec<_>>(),
                (1..=12).collect::<Vec<_>>()
            );

            // Row-major with uniform gaps.
            let gap_x = tiles[1].x - tiles[0].right_edge();
            let gap_y = tiles[4].y - tiles[0].bottom_edge();
            for row in 0..3 {
                for col in 1..4 {
                    let (a, b) = (&tiles[row * 4 + col - 1], &tiles[row * 4 + col]);
                    assert!(approx_eq(b.x - a.right_edge(), gap_x));
                    assert!(approx_eq(a.y, b.y));
                }
            }
            for i in 4..12 {
                assert!(approx_eq(tiles[i].y - tiles[i - 4].bottom_edge(), gap_y));
            }

            assert!(approx_eq(tiles[0].x, margins.left));
            assert!(approx_eq(tiles[0].y, margins.top));
            assert!(approx_eq(tiles[11].right_edge(), page.width - margins.right));
            assert!(approx_eq(tiles[11].bottom_edge(), page.height - margins.bottom));
            assert!(gap_x >= NOMINAL_GAP_MM - 1e-9 && gap_y >= NOMINAL_GAP_MM - 1e-9);
        }
    }

    #[test]
    fn a4_tile_side() {
        let tiles = calendar(PageSize::A4, Margins::default(), Weekday::Mon)
            .tiles()
            .unwrap();
        // min((273 - 15) / 4, (186 - 10) / 3)
        assert!(approx_eq(tiles[0].side, 176.0 / 3.0));
    }

    #[test]
    fn drawing_has_one_group_per_month() {
        let drawing = calendar(PageSize::A4, Margins::default(), Weekday::Mon)
            .generate()
            .unwrap();
        let groups: Vec<_> = drawing
            .children
            .iter()
            .filter(|n| matches!(n, Node::Group(_)))
            .collect();
        assert_eq!(groups.len(), 12);

        match drawing.find("MonthBox5") {
            Some(Node::Rect(rect)) => assert!(approx_eq(rect.width, rect.height)),
            _ => panic!("month box missing"),
        }
        match drawing.find("MonthName5") {
            Some(Node::Text(text)) => assert_eq!(text.content(), "May"),
            _ => panic!("month name missing"),
        }
    }

    #[test]
    fn day_numbers_follow_first_day_of_week() {
        let cal = calendar(PageSize::A4, Margins::default(), Weekday::Mon);
        let tile = cal.tiles().unwrap()[1];
        let drawing = cal.generate().unwrap();
        let col_width = tile.side / 7.0;
        let row_height = tile.side * NUMBERS_HEIGHT / 6.0;

        // 1 Feb 2024 is a Thursday: column 3, row 0. The 29th is a Thursday in row 4.
        match drawing.find("Month2Day1") {
            Some(Node::Text(text)) => {
                assert!(approx_eq(text.x, tile.x + 3.5 * col_width));
                assert!(approx_eq(
                    text.y,
                    tile.y + tile.side * 0.3 + row_height / 2.0
                ));
            }
            _ => panic!("day missing"),
        }
        match drawing.find("Month2Day29") {
            Some(Node::Text(text)) => {
                assert!(approx_eq(text.x, tile.x + 3.5 * col_width));
                assert!(approx_eq(
                    text.y,
                    tile.y + tile.side * 0.3 + 4.5 * row_height
                ));
            }
            _ => panic!("day missing"),
        }
        assert!(drawing.find("Month2Day30").is_none());
    }

    #[test]
    fn day_initials_start_with_first_day() {
        let drawing = calendar(PageSize::A5, Margins::uniform(5.0), Weekday::Sun)
            .generate()
            .unwrap();
        let group = match &drawing.children[0] {
            Node::Group(group) => group,
            _ => panic!("expected month group"),
        };
        let initials: Vec<String> = group
            .children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) if t.id.is_none() => Some(t.content()),
                _ => None,
            })
            .collect();
        assert_eq!(initials, vec!["S", "M", "T", "W", "T", "F", "S"]);
    }

    impl Tile {
        fn right_edge(&self) -> f64 {
            self.x + self.side
        }

        fn bottom_edge(&self) -> f64 {
            self.y + self.side
        }
    }
}
