use rand::Rng;
use time::{Duration, OffsetDateTime};

/// How long an issued code stays valid.
pub const CODE_TTL: Duration = Duration::minutes(10);

/// Generate a 6-digit one-time code and its expiry instant.
///
/// Codes are uniform over [100000, 999999]. `thread_rng` is a CSPRNG, which
/// one-time codes require.
pub fn generate() -> (String, OffsetDateTime) {
    let code = rand::thread_rng().gen_range(100_000..=999_999);
    (code.to_string(), OffsetDateTime::now_utc() + CODE_TTL)
}
