// File: ./src/model/item.rs
// Planning records for a single material, as exchanged with the backend
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Demand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    pub own_material_number: String,
    pub quantity: f64,
    pub day: NaiveDate,
    #[serde(default)]
    pub demand_category: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Production {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    pub own_material_number: String,
    pub quantity: f64,
    pub estimated_time_of_completion: NaiveDate,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    pub own_material_number: String,
    pub quantity: f64,
    pub date_of_departure: NaiveDate,
    pub date_of_arrival: NaiveDate,
    #[serde(default)]
    pub tracking_number: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    pub own_material_number: String,
    pub quantity: f64,
    #[serde(default)]
    pub is_blocked: bool,
}

/// Everything the weekly view needs for one material.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub demands: Vec<Demand>,
    pub productions: Vec<Production>,
    pub deliveries: Vec<Delivery>,
    pub stocks: Vec<Stock>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.demands.is_empty()
            && self.productions.is_empty()
            && self.deliveries.is_empty()
            && self.stocks.is_empty()
    }
}

/// Customer side (demand against inbound deliveries) or supplier side
/// (production against outbound shipments).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SummaryType {
    #[default]
    Demand,
    Production,
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryType::Demand => write!(f, "demand"),
            SummaryType::Production => write!(f, "production"),
        }
    }
}

impl FromStr for SummaryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "demand" => Ok(SummaryType::Demand),
            "production" => Ok(SummaryType::Production),
            other => Err(format!("unknown summary type '{}'", other)),
        }
    }
}

impl Demand {
    pub fn new(material: &str, quantity: f64, day: NaiveDate) -> Self {
        Self {
            uuid: Some(Uuid::new_v4()),
            own_material_number: material.to_string(),
            quantity,
            day,
            demand_category: String::new(),
        }
    }
}

impl Production {
    pub fn new(material: &str, quantity: f64, completion: NaiveDate) -> Self {
        Self {
            uuid: Some(Uuid::new_v4()),
            own_material_number: material.to_string(),
            quantity,
            estimated_time_of_completion: completion,
        }
    }
}

impl Delivery {
    pub fn new(material: &str, quantity: f64, departure: NaiveDate, arrival: NaiveDate) -> Self {
        Self {
            uuid: Some(Uuid::new_v4()),
            own_material_number: material.to_string(),
            quantity,
            date_of_departure: departure,
            date_of_arrival: arrival,
            tracking_number: String::new(),
        }
    }
}

impl Stock {
    pub fn new(material: &str, quantity: f64) -> Self {
        Self {
            uuid: Some(Uuid::new_v4()),
            own_material_number: material.to_string(),
            quantity,
            is_blocked: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reads_camel_case_json() {
        let json = r#"{
            "demands": [{ "ownMaterialNumber": "MNR-7307", "quantity": 40.0, "day": "2024-03-04", "demandCategory": "A1S1" }],
            "deliveries": [{ "ownMaterialNumber": "MNR-7307", "quantity": 15.5, "dateOfDeparture": "2024-03-01", "dateOfArrival": "2024-03-05" }]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.demands.len(), 1);
        assert_eq!(snapshot.demands[0].demand_category, "A1S1");
        assert_eq!(snapshot.deliveries[0].quantity, 15.5);
        assert!(snapshot.deliveries[0].uuid.is_none());
        assert!(snapshot.productions.is_empty());
        assert!(snapshot.stocks.is_empty());
    }

    #[test]
    fn new_demand_has_no_category() {
        let demand = Demand::new("MNR-7307", 5.0, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert!(demand.demand_category.is_empty());
        assert!(demand.uuid.is_some());
    }

    #[test]
    fn summary_type_parses_case_insensitively() {
        assert_eq!("Production".parse::<SummaryType>(), Ok(SummaryType::Production));
        assert!("stock".parse::<SummaryType>().is_err());
    }
}
