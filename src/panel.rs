// File: ./src/panel.rs
// The consecutive calendar weeks shown by the weekly summary view
use crate::model::CalendarWeek;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Expandable<T> {
    pub item: T,
    pub is_expanded: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CalendarWeekPanels {
    panels: Vec<Expandable<CalendarWeek>>,
}

impl CalendarWeekPanels {
    /// Panels covering a four-week window starting at `today`.
    /// That is four weeks on a Monday and five on any other day.
    pub fn starting(today: NaiveDate) -> Self {
        let count = if today.weekday() == Weekday::Mon { 4 } else { 5 };
        Self::with_count(today, count)
    }

    /// `count` consecutive weeks from the week containing `today`. Only the first is expanded.
    /// Weeks past the end of chrono's date range are left out.
    pub fn with_count(today: NaiveDate, count: usize) -> Self {
        let Some(current) = CalendarWeek::checked_from_date(today) else {
            log::warn!("No calendar week panels for {}", today);
            return Self { panels: Vec::new() };
        };
        let panels = (0..count)
            .map_while(|i| {
                current.checked_step(i as i64).map(|week| Expandable {
                    item: week,
                    is_expanded: i == 0,
                })
            })
            .collect();
        Self { panels }
    }

    /// Sets the expanded state of one panel. Returns `false` if `index` is out of range.
    pub fn expand(&mut self, index: usize, state: bool) -> bool {
        match self.panels.get_mut(index) {
            Some(panel) => {
                panel.is_expanded = state;
                true
            }
            None => false,
        }
    }

    pub fn toggle(&mut self, index: usize) -> bool {
        match self.panels.get(index) {
            Some(panel) => {
                let state = !panel.is_expanded;
                self.expand(index, state)
            }
            None => false,
        }
    }

    pub fn weeks(&self) -> Vec<CalendarWeek> {
        self.panels.iter().map(|p| p.item).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expandable<CalendarWeek>> {
        self.panels.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Expandable<CalendarWeek>> {
        self.panels.get(index)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Index of the panel whose week contains `date`.
    pub fn panel_for(&self, date: NaiveDate) -> Option<usize> {
        self.panels.iter().position(|p| p.item.contains(date))
    }
}
