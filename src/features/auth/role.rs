//! Closed set of operational roles and the role policy used by guards,
//! navigation, and page-level panels.
//!
//! Policy: membership is flat. No role inherits another role's permissions;
//! an area open to several roles must list each of them. An empty allow-list
//! means "unrestricted within the current guard tier".

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Platform owner; manages organizations and operators.
    SuperAdmin,
    /// Platform staff; manages organizations on behalf of customers.
    Operator,
    Direktor,
    Boss,
    Bugalteriya,
    Snabjeniya,
    Sklad,
    Prorab,
    Pto,
}

/// Roles allowed into the admin tier of the dashboard.
pub const ADMIN_ROLES: &[Role] = &[Role::SuperAdmin, Role::Operator];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role `{0}`")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 9] = [
        Role::SuperAdmin,
        Role::Operator,
        Role::Direktor,
        Role::Boss,
        Role::Bugalteriya,
        Role::Snabjeniya,
        Role::Sklad,
        Role::Prorab,
        Role::Pto,
    ];

    /// Wire name, identical to the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Operator => "OPERATOR",
            Role::Direktor => "DIREKTOR",
            Role::Boss => "BOSS",
            Role::Bugalteriya => "BUGALTERIYA",
            Role::Snabjeniya => "SNABJENIYA",
            Role::Sklad => "SKLAD",
            Role::Prorab => "PRORAB",
            Role::Pto => "PTO",
        }
    }

    /// Human label for headers and profile menus.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super admin",
            Role::Operator => "Operator",
            Role::Direktor => "Director",
            Role::Boss => "Boss",
            Role::Bugalteriya => "Accounting",
            Role::Snabjeniya => "Procurement",
            Role::Sklad => "Warehouse",
            Role::Prorab => "Site foreman",
            Role::Pto => "Technical department",
        }
    }

    #[must_use]
    pub fn is_admin_tier(self) -> bool {
        ADMIN_ROLES.contains(&self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownRole(value.to_string()))
    }
}

/// Returns true when `allowed` is empty or contains `role`.
///
/// A missing role (signed out, or session not loaded yet) never satisfies a
/// non-empty allow-list.
#[must_use]
pub fn has_role(role: Option<Role>, allowed: &[Role]) -> bool {
    allowed.is_empty() || role.is_some_and(|role| allowed.contains(&role))
}
