//! Roles a user can hold on a task.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role under which a user works on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Implements the task.
    Programmer,
    /// Verifies the task.
    Tester,
    /// Provides infrastructure for the task.
    Infra,
}

impl Role {
    /// Every accepted role, in canonical order.
    pub const ALL: [Self; 3] = [Self::Programmer, Self::Tester, Self::Infra];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Programmer => "programmer",
            Self::Tester => "tester",
            Self::Infra => "infra",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "programmer" => Ok(Self::Programmer),
            "tester" => Ok(Self::Tester),
            "infra" => Ok(Self::Infra),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
