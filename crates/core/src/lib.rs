//! CivicLink domain core.
//!
//! Everything here is independent of HTTP and of the storage engine:
//! complaint model and lifecycle, the access policy, the query surface,
//! reference entities (projects, budget flows), and the store traits the
//! persistence backends implement.

pub mod access;
pub mod budget;
pub mod complaint;
pub mod display;
pub mod error;
pub mod lifecycle;
pub mod memory;
pub mod project;
pub mod roles;
pub mod search;
pub mod service;
pub mod store;
pub mod types;
