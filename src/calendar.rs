use crate::models::{ActiveCell, ActivityMap, CalendarGrid, GridCell, MonthLabel};
use crate::palette::color_for;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeSet;

/// Pixel geometry shared by the grid builder and the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub cell_size: u32,
    pub padding: u32,
    pub top_margin: u32,
    pub left_margin: u32,
    pub weeks: u32,
    pub footer_margin: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cell_size: 12,
            padding: 2,
            top_margin: 20,
            left_margin: 30,
            weeks: 53,
            footer_margin: 20,
        }
    }
}

impl Layout {
    pub fn stride(&self) -> u32 {
        self.cell_size + self.padding
    }

    /// Height of the grid area, without the footer.
    pub fn grid_height(&self) -> u32 {
        self.top_margin + self.stride() * 7
    }

    pub fn width(&self) -> u32 {
        self.left_margin + self.stride() * self.weeks
    }

    pub fn height(&self) -> u32 {
        self.grid_height() + self.footer_margin
    }

    pub fn cell_origin(&self, week_index: u32, weekday_index: u32) -> (u32, u32) {
        (
            self.left_margin + week_index * self.stride(),
            self.top_margin + weekday_index * self.stride(),
        )
    }
}

/// Row of `date` in a Sunday-first week: Sunday = 0 .. Saturday = 6.
pub fn sunday_index(date: NaiveDate) -> u32 {
    (date.weekday().num_days_from_monday() + 1) % 7
}

/// First day shown: one year back from `today`, moved to the Sunday on or before it.
pub fn grid_start(today: NaiveDate) -> NaiveDate {
    let year_ago = today - Duration::days(364);
    year_ago - Duration::days(i64::from(sunday_index(year_ago)))
}

/// Last day shown: the Saturday closing the week that contains `today`.
pub fn grid_end(today: NaiveDate) -> NaiveDate {
    today + Duration::days(i64::from(6 - sunday_index(today)))
}

pub fn build_grid(today: NaiveDate, activity: &ActivityMap) -> CalendarGrid {
    build_grid_with(today, activity, &Layout::default())
}

pub fn build_grid_with(today: NaiveDate, activity: &ActivityMap, layout: &Layout) -> CalendarGrid {
    let start_date = grid_start(today);
    let end_date = grid_end(today);
    let total_days = (end_date - start_date).num_days() + 1;
    let latest_date = activity.latest_active();

    let mut cells = Vec::with_capacity(total_days as usize);
    let mut month_labels = Vec::new();
    let mut active_cells = Vec::new();
    let mut labelled_columns = BTreeSet::new();
    let mut last_month = None;

    for offset in 0..total_days {
        let date = start_date + Duration::days(offset);
        let week_index = (offset / 7) as u32;
        let weekday_index = sunday_index(date);
        let (x, y) = layout.cell_origin(week_index, weekday_index);
        let count = activity.count_on(date);

        if count > 0 {
            active_cells.push(ActiveCell { x, y, date, count });
        }

        if date.day() <= 7 && last_month != Some(date.month()) {
            if labelled_columns.insert(x) {
                month_labels.push(MonthLabel {
                    x,
                    text: date.format("%b").to_string(),
                });
            }
            last_month = Some(date.month());
        }

        cells.push(GridCell {
            date,
            count,
            week_index,
            weekday_index,
            x,
            y,
            color: color_for(count),
            is_latest: latest_date == Some(date),
        });
    }

    CalendarGrid {
        start_date,
        end_date,
        cells,
        month_labels,
        active_cells,
        latest_date,
    }
}
