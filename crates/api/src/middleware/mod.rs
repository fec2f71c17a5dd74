//! Request extractors: authentication, role checks, and the login rate
//! limiter.

pub mod auth;
pub mod rate_limit;
pub mod rbac;
