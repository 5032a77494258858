use crate::errors::{AppError, AppResult};
use crate::palette::ColorBucket;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Daily activity counts keyed by calendar date. Days that are absent count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityMap {
    days: BTreeMap<NaiveDate, u64>,
}

impl ActivityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from `YYYY-MM-DD` keys. A key that is not a valid date is rejected.
    pub fn from_iso_pairs<I, K>(pairs: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let mut map = Self::new();
        for (key, count) in pairs {
            let key = key.as_ref();
            let date = NaiveDate::parse_from_str(key, "%Y-%m-%d")
                .map_err(|err| AppError::malformed(format!("invalid date {key:?}: {err}")))?;
            map.insert(date, count);
        }
        Ok(map)
    }

    pub fn insert(&mut self, date: NaiveDate, count: u64) {
        self.days.insert(date, count);
    }

    pub fn count_on(&self, date: NaiveDate) -> u64 {
        self.days.get(&date).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Most recent date with a non-zero count.
    pub fn latest_active(&self) -> Option<NaiveDate> {
        self.days
            .iter()
            .rev()
            .find(|(_, count)| **count > 0)
            .map(|(date, _)| *date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    pub count: u64,
    pub week_index: u32,
    /// Sunday = 0 through Saturday = 6.
    pub weekday_index: u32,
    pub x: u32,
    pub y: u32,
    pub color: ColorBucket,
    pub is_latest: bool,
}

/// A cell with a non-zero count, kept as input for overlay selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveCell {
    pub x: u32,
    pub y: u32,
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLabel {
    pub x: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cells: Vec<GridCell>,
    pub month_labels: Vec<MonthLabel>,
    pub active_cells: Vec<ActiveCell>,
    pub latest_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animal {
    pub emoji: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedOverlay {
    pub position: ActiveCell,
    pub animal: Animal,
    pub delay_seconds: u32,
    pub index: usize,
}
