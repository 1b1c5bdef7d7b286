use strum::{AsRefStr, EnumString};

/// Picked once at signup and fixed for the lifetime of the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Landowner,
    Gardener,
}
