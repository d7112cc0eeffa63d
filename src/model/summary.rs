// File: ./src/model/summary.rs
// Daily projection of demand/production, deliveries and stock, rolled up per calendar week
use crate::model::item::{Delivery, Demand, Production, Snapshot, Stock, SummaryType};
use crate::model::week::CalendarWeek;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_TIMESPAN_DAYS: u32 = 28;
/// Ten years of days; longer windows are cut to this.
pub const MAX_TIMESPAN_DAYS: u32 = 3660;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PrimaryValue {
    Demand(Demand),
    Production(Production),
}

impl PrimaryValue {
    pub fn quantity(&self) -> f64 {
        match self {
            PrimaryValue::Demand(d) => d.quantity,
            PrimaryValue::Production(p) => p.quantity,
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub primary_values: Vec<PrimaryValue>,
    pub primary_value_total: f64,
    pub deliveries: Vec<Delivery>,
    pub delivery_total: f64,
    pub stocks: Vec<Stock>,
    pub stock_total: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub kind: SummaryType,
    pub daily_summaries: BTreeMap<NaiveDate, DailySummary>,
}

/// Sums of one calendar week, as shown in a collapsed week panel.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekTotals {
    pub week: CalendarWeek,
    pub primary_value_total: f64,
    pub delivery_total: f64,
    /// Projected stock at the last covered day of the week.
    pub stock_total: Option<f64>,
    pub days_covered: usize,
}

impl WeekTotals {
    pub fn is_short(&self) -> bool {
        self.stock_total.is_some_and(|s| s < 0.0)
    }
}

fn group_by<T: Clone>(items: &[T], key: impl Fn(&T) -> NaiveDate) -> HashMap<NaiveDate, Vec<T>> {
    let mut groups: HashMap<NaiveDate, Vec<T>> = HashMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item.clone());
    }
    groups
}

/// Builds the day-by-day summary for `timespan` days starting at `from`.
///
/// Day 0 carries the current stocks. Every following day projects the stock
/// forward from the previous day: production adds to it and outbound
/// shipments take from it, while on the demand side the demand consumes
/// stock and inbound deliveries replenish it.
///
/// The window is capped at [`MAX_TIMESPAN_DAYS`] and ends early at the last
/// date chrono can represent.
pub fn create_summary(kind: SummaryType, snapshot: &Snapshot, from: NaiveDate, timespan: u32) -> Summary {
    if timespan == 0 {
        log::warn!("Summary requested for an empty timespan");
    }
    let timespan = if timespan > MAX_TIMESPAN_DAYS {
        log::warn!(
            "Summary timespan of {} days cut to {}",
            timespan,
            MAX_TIMESPAN_DAYS
        );
        MAX_TIMESPAN_DAYS
    } else {
        timespan
    };

    let primaries: Vec<PrimaryValue> = match kind {
        SummaryType::Demand => snapshot.demands.iter().cloned().map(PrimaryValue::Demand).collect(),
        SummaryType::Production => snapshot
            .productions
            .iter()
            .cloned()
            .map(PrimaryValue::Production)
            .collect(),
    };
    let grouped_primaries = group_by(&primaries, |p| match p {
        PrimaryValue::Demand(d) => d.day,
        PrimaryValue::Production(p) => p.estimated_time_of_completion,
    });
    let grouped_deliveries = group_by(&snapshot.deliveries, |d| match kind {
        SummaryType::Demand => d.date_of_arrival,
        SummaryType::Production => d.date_of_departure,
    });

    let mut daily_summaries = BTreeMap::new();
    let mut previous: Option<(f64, f64, f64)> = None;

    for i in 0..timespan {
        let Some(date) = from.checked_add_days(Days::new(u64::from(i))) else {
            log::warn!("Summary from {} stops at the end of the date range", from);
            break;
        };
        let primary_values = grouped_primaries.get(&date).cloned().unwrap_or_default();
        let deliveries = grouped_deliveries.get(&date).cloned().unwrap_or_default();
        let primary_value_total: f64 = primary_values.iter().map(PrimaryValue::quantity).sum();
        let delivery_total: f64 = deliveries.iter().map(|d| d.quantity).sum();

        let (stocks, stock_total) = match previous {
            None => (
                snapshot.stocks.clone(),
                snapshot.stocks.iter().map(|s| s.quantity).sum::<f64>(),
            ),
            Some((prev_primary, prev_delivery, prev_stock)) => {
                let delta = prev_primary - prev_delivery;
                let delta = match kind {
                    SummaryType::Production => delta,
                    SummaryType::Demand => -delta,
                };
                (Vec::new(), prev_stock + delta)
            }
        };

        previous = Some((primary_value_total, delivery_total, stock_total));
        daily_summaries.insert(
            date,
            DailySummary {
                primary_values,
                primary_value_total,
                deliveries,
                delivery_total,
                stocks,
                stock_total,
            },
        );
    }

    log::debug!(
        "Built {} summary over {} days from {} ({} demands, {} productions, {} deliveries, {} stocks)",
        kind,
        timespan,
        from,
        snapshot.demands.len(),
        snapshot.productions.len(),
        snapshot.deliveries.len(),
        snapshot.stocks.len()
    );

    Summary { kind, daily_summaries }
}

impl Summary {
    pub fn day(&self, date: NaiveDate) -> Option<&DailySummary> {
        self.daily_summaries.get(&date)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.daily_summaries.keys().next().copied()
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.daily_summaries.keys().next_back().copied()
    }

    pub fn week_totals(&self, cw: CalendarWeek) -> WeekTotals {
        let covered: Vec<&DailySummary> = cw.days().iter().filter_map(|d| self.day(*d)).collect();
        WeekTotals {
            week: cw,
            primary_value_total: covered.iter().map(|d| d.primary_value_total).sum(),
            delivery_total: covered.iter().map(|d| d.delivery_total).sum(),
            stock_total: covered.last().map(|d| d.stock_total),
            days_covered: covered.len(),
        }
    }

    /// Calendar weeks touched by this summary, in order.
    pub fn weeks(&self) -> Vec<CalendarWeek> {
        let mut weeks: Vec<CalendarWeek> = Vec::new();
        for date in self.daily_summaries.keys() {
            let Some(cw) = CalendarWeek::checked_from_date(*date) else {
                continue;
            };
            if weeks.last() != Some(&cw) {
                weeks.push(cw);
            }
        }
        weeks
    }
}
