//! Git adapter: enumerates changed files between two revisions.

mod change_source;

pub use change_source::GitChangeSource;
