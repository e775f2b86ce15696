//! The input record and its edit operations

use super::field::{Field, FieldKind};
use crate::error::FieldError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sex token of the radio group, `"0"` for male and `"1"` for female
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    #[serde(rename = "0")]
    Male,
    #[serde(rename = "1")]
    Female,
}

impl Sex {
    /// Token held by the form control
    pub fn token(self) -> &'static str {
        match self {
            Sex::Male => "0",
            Sex::Female => "1",
        }
    }

    /// Integer sent to the prediction service
    pub fn encoded(self) -> i64 {
        match self {
            Sex::Male => 0,
            Sex::Female => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }

    pub fn toggled(self) -> Sex {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        }
    }

    /// Parse a radio token; `male`/`female` are accepted as aliases
    pub fn from_token(raw: &str) -> Result<Sex, FieldError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "0" | "male" | "m" => Ok(Sex::Male),
            "1" | "female" | "f" => Ok(Sex::Female),
            _ => Err(FieldError::InvalidSex {
                value: raw.to_string(),
            }),
        }
    }
}

/// Current value of one slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Sex(Sex),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Sex(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Sex(sex) => f.write_str(sex.token()),
        }
    }
}

/// Nutritional and lifestyle inputs collected by the form
///
/// Values are passed to the service as entered; only slider moves are
/// clamped to the control's range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRecord {
    pub niacin: f64,
    pub saturated_fat: f64,
    pub selenium: f64,
    pub carbs: f64,
    pub magnesium: f64,
    pub vitamin_b6: f64,
    pub potassium: f64,
    pub alcoholic_drinks: f64,
    pub phosphorus: f64,
    pub total_fat: f64,
    pub protein: f64,
    pub alcohol: f64,
    pub mono_fat: f64,
    pub calories: f64,
    pub unsat_to_sat_fat_ratio: f64,
    pub fat_to_calorie_ratio: f64,
    pub age: f64,
    pub sex: Sex,
}

impl Default for InputRecord {
    fn default() -> Self {
        let mut record = Self {
            niacin: 0.0,
            saturated_fat: 0.0,
            selenium: 0.0,
            carbs: 0.0,
            magnesium: 0.0,
            vitamin_b6: 0.0,
            potassium: 0.0,
            alcoholic_drinks: 0.0,
            phosphorus: 0.0,
            total_fat: 0.0,
            protein: 0.0,
            alcohol: 0.0,
            mono_fat: 0.0,
            calories: 0.0,
            unsat_to_sat_fat_ratio: 0.0,
            fat_to_calorie_ratio: 0.0,
            age: 0.0,
            sex: Sex::Male,
        };
        for field in Field::ALL {
            if let FieldKind::Numeric { default, .. } = field.spec().kind {
                if let Some(slot) = record.slot_mut(field) {
                    *slot = default;
                }
            }
        }
        record
    }
}

impl InputRecord {
    /// Read the value of a slot
    pub fn get(&self, field: Field) -> FieldValue {
        match self.slot(field) {
            Some(value) => FieldValue::Number(*value),
            None => FieldValue::Sex(self.sex),
        }
    }

    /// Numeric value of a slot, `None` for sex
    pub fn number(&self, field: Field) -> Option<f64> {
        self.get(field).as_number()
    }

    /// Overwrite a numeric slot; non-finite numbers are rejected
    pub fn set_number(&mut self, field: Field, value: f64) -> Result<(), FieldError> {
        let Some(slot) = self.slot_mut(field) else {
            return Err(FieldError::InvalidSex {
                value: value.to_string(),
            });
        };
        if !value.is_finite() {
            return Err(FieldError::NotFinite { field: field.key() });
        }
        *slot = value;
        Ok(())
    }

    pub fn set_sex(&mut self, sex: Sex) {
        self.sex = sex;
    }

    /// Apply a text-box edit
    ///
    /// Empty text becomes 0. No range check is applied.
    pub fn set_text(&mut self, field: Field, raw: &str) -> Result<(), FieldError> {
        if field == Field::Sex {
            self.sex = Sex::from_token(raw)?;
            return Ok(());
        }
        let value = parse_number(field, raw)?;
        self.set_number(field, value)
    }

    /// Apply a slider move of `steps` increments; sex toggles instead
    pub fn nudge(&mut self, field: Field, steps: i32) {
        let Some(range) = field.range() else {
            if steps != 0 {
                self.sex = self.sex.toggled();
            }
            return;
        };
        let Some(slot) = self.slot_mut(field) else {
            return;
        };
        let base = range.snap(*slot);
        *slot = if steps == 0 {
            base
        } else {
            range.snap(base + f64::from(steps) * range.step)
        };
    }

    /// Text shown in the numeric box for a slot
    pub fn display_value(&self, field: Field) -> String {
        self.get(field).to_string()
    }

    /// Numeric slot of `field`, `None` for sex
    fn slot(&self, field: Field) -> Option<&f64> {
        let slot = match field {
            Field::Niacin => &self.niacin,
            Field::SaturatedFat => &self.saturated_fat,
            Field::Selenium => &self.selenium,
            Field::Carbs => &self.carbs,
            Field::Magnesium => &self.magnesium,
            Field::VitaminB6 => &self.vitamin_b6,
            Field::Potassium => &self.potassium,
            Field::AlcoholicDrinks => &self.alcoholic_drinks,
            Field::Phosphorus => &self.phosphorus,
            Field::TotalFat => &self.total_fat,
            Field::Protein => &self.protein,
            Field::Alcohol => &self.alcohol,
            Field::MonoFat => &self.mono_fat,
            Field::Calories => &self.calories,
            Field::UnsatToSatFatRatio => &self.unsat_to_sat_fat_ratio,
            Field::FatToCalorieRatio => &self.fat_to_calorie_ratio,
            Field::Age => &self.age,
            Field::Sex => return None,
        };
        Some(slot)
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut f64> {
        let slot = match field {
            Field::Niacin => &mut self.niacin,
            Field::SaturatedFat => &mut self.saturated_fat,
            Field::Selenium => &mut self.selenium,
            Field::Carbs => &mut self.carbs,
            Field::Magnesium => &mut self.magnesium,
            Field::VitaminB6 => &mut self.vitamin_b6,
            Field::Potassium => &mut self.potassium,
            Field::AlcoholicDrinks => &mut self.alcoholic_drinks,
            Field::Phosphorus => &mut self.phosphorus,
            Field::TotalFat => &mut self.total_fat,
            Field::Protein => &mut self.protein,
            Field::Alcohol => &mut self.alcohol,
            Field::MonoFat => &mut self.mono_fat,
            Field::Calories => &mut self.calories,
            Field::UnsatToSatFatRatio => &mut self.unsat_to_sat_fat_ratio,
            Field::FatToCalorieRatio => &mut self.fat_to_calorie_ratio,
            Field::Age => &mut self.age,
            Field::Sex => return None,
        };
        Some(slot)
    }
}

/// Parse the raw text of a numeric box
fn parse_number(field: Field, raw: &str) -> Result<f64, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let value: f64 = trimmed.parse().map_err(|_| FieldError::NotANumber {
        field: field.key(),
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(FieldError::NotFinite { field: field.key() });
    }
    Ok(value)
}
