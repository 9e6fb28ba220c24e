// 🧮 BMI Calculator
// weight / height², bucketed with the dashboard's fixed thresholds

use crate::error::{HealthError, Result};
use serde::Serialize;
use std::fmt;

pub const HEIGHT_RANGE: (f64, f64) = (1.0, 2.5);
pub const WEIGHT_RANGE: (f64, f64) = (30.0, 150.0);
pub const DEFAULT_HEIGHT_M: f64 = 1.65;
pub const DEFAULT_WEIGHT_KG: f64 = 65.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

/// How a result should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Warning,
    Error,
}

impl BmiCategory {
    pub fn from_value(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 24.9 {
            BmiCategory::Normal
        } else if bmi < 29.9 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            BmiCategory::Normal => Tone::Success,
            BmiCategory::Underweight | BmiCategory::Overweight => Tone::Warning,
            BmiCategory::Obese => Tone::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bmi {
    pub value: f64,
    pub category: BmiCategory,
}

impl Bmi {
    /// Compute BMI from height in meters and weight in kilograms
    pub fn calculate(height_m: f64, weight_kg: f64) -> Result<Self> {
        check_range("height", height_m, HEIGHT_RANGE)?;
        check_range("weight", weight_kg, WEIGHT_RANGE)?;

        let value = weight_kg / (height_m * height_m);
        Ok(Bmi {
            value,
            category: BmiCategory::from_value(value),
        })
    }
}

impl fmt::Display for Bmi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Your BMI: {:.2}", self.value)
    }
}

fn check_range(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(HealthError::OutOfRange { field, value, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inputs() {
        let bmi = Bmi::calculate(DEFAULT_HEIGHT_M, DEFAULT_WEIGHT_KG).unwrap();
        assert!((bmi.value - 23.875).abs() < 1e-3);
        assert_eq!(bmi.category, BmiCategory::Normal);
        assert_eq!(bmi.to_string(), "Your BMI: 23.88");
    }

    #[test]
    fn test_category_thresholds() {
        assert_eq!(BmiCategory::from_value(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_value(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_value(24.89), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_value(24.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(29.89), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(29.9), BmiCategory::Obese);
    }

    #[test]
    fn test_category_tone() {
        assert_eq!(BmiCategory::Underweight.tone(), Tone::Warning);
        assert_eq!(BmiCategory::Normal.tone(), Tone::Success);
        assert_eq!(BmiCategory::Overweight.tone(), Tone::Warning);
        assert_eq!(BmiCategory::Obese.tone(), Tone::Error);
    }

    #[test]
    fn test_extremes_of_range() {
        assert_eq!(Bmi::calculate(2.5, 30.0).unwrap().category, BmiCategory::Underweight);
        assert_eq!(Bmi::calculate(1.0, 150.0).unwrap().category, BmiCategory::Obese);
    }

    #[test]
    fn test_out_of_range_inputs() {
        match Bmi::calculate(0.5, 65.0) {
            Err(HealthError::OutOfRange { field, .. }) => assert_eq!(field, "height"),
            other => panic!("expected height error, got {:?}", other),
        }
        match Bmi::calculate(1.7, 200.0) {
            Err(HealthError::OutOfRange { field, .. }) => assert_eq!(field, "weight"),
            other => panic!("expected weight error, got {:?}", other),
        }
        assert!(Bmi::calculate(f64::NAN, 65.0).is_err());
    }
}
