use std::{fmt, str::FromStr};

use sqlx::FromRow;

use crate::error::ValidationError;

/// Member record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String, // argon2 PHC string
    pub plan: String,
}

/// Row shown on the admin dashboard. Never carries the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct MemberSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub plan: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct MemberProfile {
    pub name: String,
    pub email: String,
    pub plan: String,
}

/// Membership tiers offered at sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Basic,
    Standard,
    Premium,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Basic, Plan::Standard, Plan::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Standard => "standard",
            Plan::Premium => "premium",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Plan::Basic => "Basic",
            Plan::Standard => "Standard",
            Plan::Premium => "Premium",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Plan::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownPlan(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_parses_case_insensitively() {
        assert_eq!("Premium".parse::<Plan>().unwrap(), Plan::Premium);
        assert_eq!(" basic ".parse::<Plan>().unwrap(), Plan::Basic);
        assert_eq!(
            "gold".parse::<Plan>(),
            Err(ValidationError::UnknownPlan("gold".into()))
        );
    }
}
