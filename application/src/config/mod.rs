//! Application-level configuration.
//!
//! - [`TeamParams`]: timeouts and buffering for crew runs

pub mod team_params;

pub use team_params::TeamParams;
