//! Source artifacts under review.
//!
//! - [`entities::Artifact`]: a path plus its text content
//! - [`filter::ArtifactFilter`]: root/extension allow-list for changed paths
//! - [`naming::ReportNamer`]: collision-free report file names

pub mod entities;
pub mod filter;
pub mod naming;
