//! Streaming events for backend communication.
//!
//! [`StreamEvent`] represents individual events in a streaming model response,
//! letting the crew forward output to callers as it is generated.

/// An event in a streaming model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text chunk from the model.
    Delta(String),
    /// The complete response text (signals stream end).
    Completed(String),
    /// An error that occurred during streaming.
    Error(String),
}
