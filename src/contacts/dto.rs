use serde::Deserialize;

use crate::{error::ValidationError, validation::required};

#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub message: String,
}

impl TryFrom<ContactForm> for NewContact {
    type Error = ValidationError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required(form.name, "name")?,
            message: required(form.message, "message")?,
        })
    }
}
