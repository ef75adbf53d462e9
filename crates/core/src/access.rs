//! Coarse role-based view access.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operator role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access.
    #[default]
    Admin,
    /// Dispatch staff; sees the transfer log only.
    Coordinator,
}

/// Screen or report an operator can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Transfer log.
    Transfers,
    /// Driver directory.
    Drivers,
    /// Company directory.
    Companies,
    /// Settlement statements.
    Settlements,
}

impl Role {
    /// Returns true if the role may open the view.
    #[must_use]
    pub const fn can_view(self, view: View) -> bool {
        match self {
            Self::Admin => true,
            Self::Coordinator => matches!(view, View::Transfers),
        }
    }

    /// Returns true if the role may export the transfer log.
    #[must_use]
    pub const fn can_export_transfers(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("admin"),
            Self::Coordinator => f.write_str("coordinator"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "coordinator" => Ok(Self::Coordinator),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_sees_everything() {
        for view in [View::Transfers, View::Drivers, View::Companies, View::Settlements] {
            assert!(Role::Admin.can_view(view), "{view:?}");
        }
        assert!(Role::Admin.can_export_transfers());
    }

    #[test]
    fn test_coordinator_sees_transfers_only() {
        assert!(Role::Coordinator.can_view(View::Transfers));
        for view in [View::Drivers, View::Companies, View::Settlements] {
            assert!(!Role::Coordinator.can_view(view), "{view:?}");
        }
        assert!(!Role::Coordinator.can_export_transfers());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" coordinator ".parse::<Role>(), Ok(Role::Coordinator));
        assert!("driver".parse::<Role>().is_err());
        assert_eq!(Role::Coordinator.to_string(), "coordinator");
    }
}
