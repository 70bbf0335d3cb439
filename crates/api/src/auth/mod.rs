//! Authentication primitives.
//!
//! - [`jwt`] -- validation of bearer tokens issued by the identity provider.

pub mod jwt;
