//! Request and response bodies exchanged with the prediction service

use crate::record::InputRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outbound `POST /predict` body, keyed by the service's feature names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "Niacin")]
    pub niacin: f64,
    #[serde(rename = "SaturatedFat")]
    pub saturated_fat: f64,
    #[serde(rename = "Selenium")]
    pub selenium: f64,
    #[serde(rename = "Carbs")]
    pub carbs: f64,
    #[serde(rename = "Magnesium")]
    pub magnesium: f64,
    #[serde(rename = "VitaminB6")]
    pub vitamin_b6: f64,
    #[serde(rename = "Potassium")]
    pub potassium: f64,
    #[serde(rename = "AlcoholicDrinks")]
    pub alcoholic_drinks: f64,
    #[serde(rename = "Phosphorus")]
    pub phosphorus: f64,
    #[serde(rename = "TotalFat")]
    pub total_fat: f64,
    #[serde(rename = "Protein")]
    pub protein: f64,
    #[serde(rename = "Alcohol")]
    pub alcohol: f64,
    #[serde(rename = "MonoFat")]
    pub mono_fat: f64,
    #[serde(rename = "Calories")]
    pub calories: f64,
    #[serde(rename = "Unsat_to_Sat_Fat_Ratio")]
    pub unsat_to_sat_fat_ratio: f64,
    #[serde(rename = "Fat_to_Calorie_Ratio")]
    pub fat_to_calorie_ratio: f64,
    #[serde(rename = "Age")]
    pub age: f64,
    /// Integer, never the `"0"`/`"1"` token
    #[serde(rename = "Sex_encoded")]
    pub sex_encoded: i64,
}

impl From<&InputRecord> for PredictionRequest {
    fn from(record: &InputRecord) -> Self {
        Self {
            niacin: record.niacin,
            saturated_fat: record.saturated_fat,
            selenium: record.selenium,
            carbs: record.carbs,
            magnesium: record.magnesium,
            vitamin_b6: record.vitamin_b6,
            potassium: record.potassium,
            alcoholic_drinks: record.alcoholic_drinks,
            phosphorus: record.phosphorus,
            total_fat: record.total_fat,
            protein: record.protein,
            alcohol: record.alcohol,
            mono_fat: record.mono_fat,
            calories: record.calories,
            unsat_to_sat_fat_ratio: record.unsat_to_sat_fat_ratio,
            fat_to_calorie_ratio: record.fat_to_calorie_ratio,
            age: record.age,
            sex_encoded: record.sex.encoded(),
        }
    }
}

/// Binary classifier output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum RiskFlag {
    Low,
    High,
}

impl RiskFlag {
    pub fn is_high(self) -> bool {
        self == RiskFlag::High
    }

    pub fn as_int(self) -> i64 {
        match self {
            RiskFlag::Low => 0,
            RiskFlag::High => 1,
        }
    }
}

impl TryFrom<i64> for RiskFlag {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RiskFlag::Low),
            1 => Ok(RiskFlag::High),
            other => Err(format!("risk must be 0 or 1, got {}", other)),
        }
    }
}

impl From<RiskFlag> for i64 {
    fn from(flag: RiskFlag) -> Self {
        flag.as_int()
    }
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskFlag::Low => f.write_str("Low Risk"),
            RiskFlag::High => f.write_str("High Risk"),
        }
    }
}

/// Inbound `POST /predict` body
///
/// `scaled_features` and `feature_names` are positionally paired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub risk: RiskFlag,
    /// Probability of the high-risk class
    pub probability: f64,
    /// One probability per class, low first
    pub raw_probabilities: Vec<f64>,
    pub scaled_features: Vec<f64>,
    pub feature_names: Vec<String>,
}

impl PredictionResult {
    /// Feature names paired with their scaled values
    ///
    /// Pairs stop at the shorter of the two sequences.
    pub fn features(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.feature_names
            .iter()
            .map(String::as_str)
            .zip(self.scaled_features.iter().copied())
    }

    /// Whether names and values line up one to one
    pub fn features_aligned(&self) -> bool {
        self.feature_names.len() == self.scaled_features.len()
    }
}

/// Body of `GET /`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub message: String,
}

/// Error body the service sends with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: serde_json::Value,
}
