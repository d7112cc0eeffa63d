// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod item;
pub mod summary;
pub mod week;

pub use item::{Delivery, Demand, Production, Snapshot, Stock, SummaryType};
pub use summary::{DailySummary, PrimaryValue, Summary, WeekTotals, create_summary};
pub use week::{CalendarWeek, ParseWeekError, increment_date, iso_weeks_in_year};
