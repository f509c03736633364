use serde::Deserialize;

use crate::{error::ValidationError, validation::positive_number};

#[derive(Debug, Default, Deserialize)]
pub struct BmiForm {
    pub weight: Option<String>,
    pub height: Option<String>,
}

/// Validated calculator input. Both values are finite and > 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiInput {
    pub weight_kg: f64,
    pub height_cm: f64,
}

impl TryFrom<BmiForm> for BmiInput {
    type Error = ValidationError;

    fn try_from(form: BmiForm) -> Result<Self, Self::Error> {
        Ok(Self {
            weight_kg: positive_number(form.weight, "Weight")?,
            height_cm: positive_number(form.height, "Height")?,
        })
    }
}

/// Body mass index rounded to two decimals. Inputs whose ratio overflows
/// `f64` are rejected.
pub fn bmi(input: BmiInput) -> Result<f64, ValidationError> {
    let height_m = input.height_cm / 100.0;
    let value = input.weight_kg / (height_m * height_m);
    let rounded = (value * 100.0).round() / 100.0;
    if !rounded.is_finite() {
        return Err(ValidationError::OutOfRange("BMI"));
    }
    Ok(rounded)
}
