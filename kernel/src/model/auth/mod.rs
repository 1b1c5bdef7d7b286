pub mod event;

/// Opaque session token handed out at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);
