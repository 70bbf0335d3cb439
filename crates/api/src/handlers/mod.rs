//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Complaint handlers delegate to `ComplaintService`, which owns the access
//! policy; catalogue handlers validate input and call the stores directly.

pub mod budget;
pub mod complaints;
pub mod projects;
pub mod roles;
