use std::time::Duration;

use time::OffsetDateTime;
use tracing::{info, warn};

use crate::auth::{code, password};
use crate::error::AuthError;
use crate::state::AppState;
use crate::store::User;

/// Hard bound on a single delivery attempt; a stalled relay must not hold
/// the issuing request open.
const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a credential record for a new email.
pub async fn register(
    state: &AppState,
    email: &str,
    password_plain: &str,
) -> Result<User, AuthError> {
    if email.is_empty() || password_plain.is_empty() {
        return Err(AuthError::Validation("Email and password are required"));
    }

    if state.store.find_by_email(email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AuthError::Conflict);
    }

    let hash = password::hash_password(password_plain)?;
    // A concurrent insert for the same email loses here and maps to the
    // same conflict as the check above.
    let user = state.store.insert(email, &hash).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Issue a fresh one-time code, replacing any pending one, and notify the
/// user out of band.
///
/// The success contract is "a code was generated and stored". Delivery
/// failure or timeout is logged and swallowed.
pub async fn issue_code(state: &AppState, email: &str) -> Result<(), AuthError> {
    let user = state
        .store
        .find_by_email(email)
        .await?
        .ok_or(AuthError::NotFound)?;

    let (code, expires_at) = code::generate();
    state
        .store
        .update_code_fields(email, &code, expires_at)
        .await?;
    info!(user_id = %user.id, email = %email, "verification code issued");

    match tokio::time::timeout(SEND_TIMEOUT, state.mailer.send_code(email, &code)).await {
        Ok(Ok(())) => info!(email = %email, "verification code delivered"),
        Ok(Err(e)) => warn!(error = %e, email = %email, "verification code delivery failed"),
        Err(_) => warn!(email = %email, "verification code delivery timed out"),
    }

    Ok(())
}

/// Check a supplied code against the stored one.
///
/// Wrong and expired codes surface as the same error. A matching code is
/// left in place and stays valid until its expiry.
pub async fn verify_code(state: &AppState, email: &str, code: &str) -> Result<(), AuthError> {
    let user = state
        .store
        .find_by_email(email)
        .await?
        .ok_or(AuthError::NotFound)?;

    match (user.verification_code.as_deref(), user.code_expires_at) {
        (Some(stored), Some(expires_at))
            if stored == code && OffsetDateTime::now_utc() < expires_at =>
        {
            info!(user_id = %user.id, email = %email, "verification code accepted");
            Ok(())
        }
        _ => {
            warn!(user_id = %user.id, email = %email, "invalid or expired verification code");
            Err(AuthError::InvalidCode)
        }
    }
}

/// Password check. Independent of code verification; composing the two
/// factors is the caller's concern.
pub async fn login(
    state: &AppState,
    email: &str,
    password_plain: &str,
) -> Result<User, AuthError> {
    let user = state
        .store
        .find_by_email(email)
        .await?
        .ok_or(AuthError::NotFound)?;

    if !password::verify_password(password_plain, &user.password_hash)? {
        warn!(user_id = %user.id, email = %email, "login with wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    info!(user_id = %user.id, email = %email, "user logged in");
    Ok(user)
}
