use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

/// Length of a generated refresh token in characters.
///
/// 64 alphanumeric characters carry ~380 bits of entropy, comfortably above
/// the 256-bit unguessability floor for bearer credentials.
pub const REFRESH_TOKEN_LENGTH: usize = 64;

/// Generate an opaque refresh-token string from OS randomness.
///
/// The value is a pure bearer secret: it encodes nothing and is only ever
/// compared by exact match against the stored record.
pub fn generate_token() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(REFRESH_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
