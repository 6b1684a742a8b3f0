use thiserror::Error;

/// Synchronous input rejection, reported directly to the user before any
/// request is issued. The display text is the exact message the form
/// shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please enter a valid User ID")]
pub struct InvalidUserId;
