use serde::Deserialize;

/// Form body for member login.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Form body for admin login.
#[derive(Debug, Default, Deserialize)]
pub struct AdminLoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}
