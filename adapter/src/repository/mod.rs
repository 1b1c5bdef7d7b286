use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};

pub mod auth;
pub mod chat;
pub mod health;
pub mod profile;
pub mod request;
pub mod space;
pub mod user;

/// 256 bits of randomness, URL-safe so it survives being embedded in a QR
/// code or an Authorization header unescaped.
pub(crate) fn generate_opaque_token() -> String {
    let mut buf = [0u8; 32];
    OsRng.fill_bytes(&mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}
