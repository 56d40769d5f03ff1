use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Platform roles, strictly ordered `User < Driver < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    User,
    Driver,
    Admin,
}

/// Returned when a string names no known role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Driver, Role::Admin];

    /// Wire name of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Driver => "DRIVER",
            Role::Admin => "ADMIN",
        }
    }

    /// Numeric rank; every legitimate role ranks above zero.
    pub const fn rank(self) -> u8 {
        match self {
            Role::User => 1,
            Role::Driver => 2,
            Role::Admin => 3,
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
