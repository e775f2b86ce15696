//! Field catalogue for the input record
//!
//! Every input control of the form is described here once: its label, unit,
//! slider range and step, default value and the name the prediction service
//! expects on the wire.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One input of the form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Age,
    Sex,
    Calories,
    Protein,
    Carbs,
    TotalFat,
    SaturatedFat,
    MonoFat,
    Niacin,
    VitaminB6,
    Magnesium,
    Phosphorus,
    Potassium,
    Selenium,
    AlcoholicDrinks,
    Alcohol,
    UnsatToSatFatRatio,
    FatToCalorieRatio,
}

/// Slider bounds of a numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Clamp into `[min, max]` and snap to the step grid anchored at `min`
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        // Strip float noise such as 1.7000000000000002
        let scale = 10f64.powi(self.decimals() as i32);
        ((snapped * scale).round() / scale).clamp(self.min, self.max)
    }

    /// Number of decimals needed to show a value on this grid
    pub fn decimals(&self) -> usize {
        let text = self.step.to_string();
        text.split_once('.').map(|(_, frac)| frac.len()).unwrap_or(0)
    }

    /// Position of `value` on the slider track, in `[0, 1]`
    pub fn fraction(&self, value: f64) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Kind of control backing a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Paired slider and numeric text box
    Numeric { range: SliderRange, default: f64 },
    /// Male / female radio group
    Categorical,
}

/// Static description of a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Internal key, e.g. `totalFat`
    pub key: &'static str,
    /// Label shown above the control
    pub label: &'static str,
    /// Unit adornment, empty for ratios
    pub unit: &'static str,
    /// Name used by the prediction service
    pub wire_name: &'static str,
    pub kind: FieldKind,
}

fn numeric(
    key: &'static str,
    label: &'static str,
    unit: &'static str,
    wire_name: &'static str,
    range: SliderRange,
    default: f64,
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        unit,
        wire_name,
        kind: FieldKind::Numeric { range, default },
    }
}

impl Field {
    /// All fields in display order
    pub const ALL: [Field; 18] = [
        Field::Age,
        Field::Sex,
        Field::Calories,
        Field::Protein,
        Field::Carbs,
        Field::TotalFat,
        Field::SaturatedFat,
        Field::MonoFat,
        Field::Niacin,
        Field::VitaminB6,
        Field::Magnesium,
        Field::Phosphorus,
        Field::Potassium,
        Field::Selenium,
        Field::AlcoholicDrinks,
        Field::Alcohol,
        Field::UnsatToSatFatRatio,
        Field::FatToCalorieRatio,
    ];

    /// Static description of this field
    pub fn spec(self) -> FieldSpec {
        match self {
            Field::Age => numeric("age", "Age", "years", "Age", SliderRange::new(18.0, 100.0, 1.0), 35.0),
            Field::Sex => FieldSpec {
                key: "sex",
                label: "Sex",
                unit: "",
                wire_name: "Sex_encoded",
                kind: FieldKind::Categorical,
            },
            Field::Calories => numeric(
                "calories",
                "Calories (kcal/day)",
                "kcal",
                "Calories",
                SliderRange::new(1000.0, 4000.0, 100.0),
                2000.0,
            ),
            Field::Protein => numeric("protein", "Protein (g/day)", "g", "Protein", SliderRange::new(0.0, 200.0, 5.0), 50.0),
            Field::Carbs => numeric("carbs", "Carbohydrates (g/day)", "g", "Carbs", SliderRange::new(0.0, 500.0, 10.0), 200.0),
            Field::TotalFat => numeric("totalFat", "Total Fat (g/day)", "g", "TotalFat", SliderRange::new(0.0, 150.0, 5.0), 65.0),
            Field::SaturatedFat => numeric(
                "saturatedFat",
                "Saturated Fat (g/day)",
                "g",
                "SaturatedFat",
                SliderRange::new(0.0, 50.0, 1.0),
                20.0,
            ),
            Field::MonoFat => numeric(
                "monoFat",
                "Monounsaturated Fat (g/day)",
                "g",
                "MonoFat",
                SliderRange::new(0.0, 50.0, 1.0),
                20.0,
            ),
            Field::Niacin => numeric("niacin", "Niacin (mg/day)", "mg", "Niacin", SliderRange::new(0.0, 50.0, 1.0), 15.0),
            Field::VitaminB6 => numeric("vitaminB6", "Vitamin B6 (mg/day)", "mg", "VitaminB6", SliderRange::new(0.0, 5.0, 0.1), 1.7),
            Field::Magnesium => numeric(
                "magnesium",
                "Magnesium (mg/day)",
                "mg",
                "Magnesium",
                SliderRange::new(0.0, 1000.0, 10.0),
                400.0,
            ),
            Field::Phosphorus => numeric(
                "phosphorus",
                "Phosphorus (mg/day)",
                "mg",
                "Phosphorus",
                SliderRange::new(0.0, 2000.0, 10.0),
                700.0,
            ),
            Field::Potassium => numeric(
                "potassium",
                "Potassium (mg/day)",
                "mg",
                "Potassium",
                SliderRange::new(0.0, 5000.0, 100.0),
                3500.0,
            ),
            Field::Selenium => numeric("selenium", "Selenium (mcg/day)", "mcg", "Selenium", SliderRange::new(0.0, 200.0, 5.0), 55.0),
            Field::AlcoholicDrinks => numeric(
                "alcoholicDrinks",
                "Alcoholic Drinks (per week)",
                "drinks/week",
                "AlcoholicDrinks",
                SliderRange::new(0.0, 20.0, 1.0),
                0.0,
            ),
            Field::Alcohol => numeric("alcohol", "Alcohol (g/day)", "g", "Alcohol", SliderRange::new(0.0, 50.0, 1.0), 0.0),
            Field::UnsatToSatFatRatio => numeric(
                "unsatToSatFatRatio",
                "Unsaturated to Saturated Fat Ratio",
                "",
                "Unsat_to_Sat_Fat_Ratio",
                SliderRange::new(0.0, 5.0, 0.1),
                2.5,
            ),
            Field::FatToCalorieRatio => numeric(
                "fatToCalorieRatio",
                "Fat to Calorie Ratio",
                "",
                "Fat_to_Calorie_Ratio",
                SliderRange::new(0.0, 1.0, 0.05),
                0.3,
            ),
        }
    }

    pub fn key(self) -> &'static str {
        self.spec().key
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn unit(self) -> &'static str {
        self.spec().unit
    }

    pub fn wire_name(self) -> &'static str {
        self.spec().wire_name
    }

    /// Slider range, `None` for the sex radio group
    pub fn range(self) -> Option<SliderRange> {
        match self.spec().kind {
            FieldKind::Numeric { range, .. } => Some(range),
            FieldKind::Categorical => None,
        }
    }

    /// Position in [`Field::ALL`]
    pub fn index(self) -> usize {
        Field::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next field in display order, wrapping around
    pub fn next(self) -> Field {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    /// Previous field in display order, wrapping around
    pub fn prev(self) -> Field {
        let len = Field::ALL.len();
        Field::ALL[(self.index() + len - 1) % len]
    }

    /// Look a field up by internal key, snake_case key or wire name
    pub fn lookup(name: &str) -> Option<Field> {
        let wanted = normalize(name);
        Field::ALL.into_iter().find(|field| {
            let spec = field.spec();
            normalize(spec.key) == wanted || normalize(spec.wire_name) == wanted
        })
    }
}

/// Lowercase and drop separators so `total_fat`, `totalFat` and `TotalFat` compare equal
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::lookup(s.trim()).ok_or_else(|| FieldError::UnknownField {
            name: s.to_string(),
        })
    }
}
