use serde::Deserialize;

use super::repo_types::Plan;
use crate::{
    error::ValidationError,
    validation::{is_valid_email, normalize_email, required, required_raw},
};

/// Raw sign-up form. Fields are optional so that missing inputs surface as
/// validation messages.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub plan: Option<String>,
}

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub password: String,
    pub plan: Plan,
}

impl TryFrom<RegisterForm> for NewMember {
    type Error = ValidationError;

    fn try_from(form: RegisterForm) -> Result<Self, Self::Error> {
        let name = required(form.name, "name")?;
        let email = normalize_email(&required(form.email, "email")?);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }
        let password = required_raw(form.password, "password")?;
        let plan = required(form.plan, "plan")?.parse::<Plan>()?;
        Ok(Self {
            name,
            email,
            password,
            plan,
        })
    }
}
