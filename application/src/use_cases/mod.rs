//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod ask_team;
pub mod review_changes;
pub mod run_team;

#[cfg(test)]
pub(crate) mod test_support;
