//! Request extractors guarding the dashboard: [`auth::AuthUser`] for any
//! logged-in account, [`rbac::RequireAdmin`] for user management.

pub mod auth;
pub mod rbac;
