//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated identity and its effective role.
//! - [`auth::MaybeAuth`] -- the caller on routes that also serve anonymous users.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`rbac::RequireAuth`] -- requires any authenticated identity.

pub mod auth;
pub mod rbac;
