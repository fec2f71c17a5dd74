//! Staff role names.
//!
//! Stored as plain strings on the `staff` table and carried in JWT claims.

pub const ROLE_FLOOR: &str = "floor";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_ADMIN: &str = "admin";

/// All roles a staff account may hold.
pub const ALL_ROLES: &[&str] = &[ROLE_FLOOR, ROLE_MANAGER, ROLE_ADMIN];

pub fn is_valid_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}
