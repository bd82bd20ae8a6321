//! Session domain.
//!
//! - [`id::SessionId`]: opaque token threading memory across requests
//! - [`entities::Message`]: a single turn recorded in session memory
//! - [`stream::StreamEvent`]: incremental output from a backend call

pub mod entities;
pub mod id;
pub mod stream;
