//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: identifier of the backend model a member runs on
//! - [`role::ReviewerRole`]: the three reviewer specializations
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod role;
