//! Hierarchical role-based authorization.
//!
//! Admission is a threshold check: a caller is admitted when their rank is at least the
//! lowest rank among the required roles. Requiring `{DRIVER, ADMIN}` therefore means
//! "DRIVER or higher", never "exactly one of DRIVER or ADMIN".

pub mod role;

pub use role::Role;
pub use role::UnknownRole;

/// Rank of a role name: USER=1, DRIVER=2, ADMIN=3, anything else 0.
pub fn rank_of(role: &str) -> u8 {
    role.parse::<Role>().map_or(0, Role::rank)
}

/// Decide whether `caller_role` may pass a gate requiring `required_roles`.
///
/// Only the minimum rank of `required_roles` matters. An empty set admits nobody.
pub fn admit(caller_role: &str, required_roles: &[Role]) -> bool {
    RoleRequirement::any_of(required_roles)
        .is_some_and(|requirement| requirement.admits(caller_role))
}

/// A "this role or higher" gate for a protected operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRequirement {
    minimum: Role,
}

impl RoleRequirement {
    pub const fn at_least(minimum: Role) -> Self {
        Self { minimum }
    }

    /// Collapse a set of roles to the threshold of its lowest-ranked member.
    ///
    /// Returns `None` for an empty set.
    pub fn any_of(roles: &[Role]) -> Option<Self> {
        roles.iter().copied().min_by_key(|role| role.rank()).map(Self::at_least)
    }

    pub fn minimum(&self) -> Role {
        self.minimum
    }

    pub fn admits(&self, caller_role: &str) -> bool {
        rank_of(caller_role) >= self.minimum.rank()
    }
}
