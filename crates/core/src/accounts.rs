//! Account rules: signup field validation and the login cooldown.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::Timestamp;

/// Minimum number of seconds between two successful logins of one account.
pub const LOGIN_COOLDOWN_SECS: i64 = 30;

/// Structural email check: local part, `@`, domain, and an alphabetic TLD.
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Returns `true` when `email` has a plausible `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && EMAIL_RE.is_match(email)
}

/// Reject an empty value for a required field.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::Validation(format!("Missing required field '{field}'")));
    }
    Ok(())
}

/// Validate the raw signup fields and resolve the requested role.
pub fn validate_signup(
    username: &str,
    email: &str,
    role: &str,
    password: &str,
) -> Result<Role, CoreError> {
    require_non_empty("username", username)?;
    require_non_empty("email", email)?;
    require_non_empty("password", password)?;
    require_non_empty("role", role)?;

    if !is_valid_email(email) {
        return Err(CoreError::Validation("Invalid email address".into()));
    }

    role.parse::<Role>().map_err(CoreError::Validation)
}

/// Seconds the caller still has to wait before logging in again, if any.
///
/// A `last_login` in the future (clock skew between app and database) counts
/// as "just logged in".
pub fn login_cooldown_remaining(last_login: Option<Timestamp>, now: Timestamp) -> Option<i64> {
    let last = last_login?;
    let elapsed = (now - last).num_seconds();
    if elapsed < LOGIN_COOLDOWN_SECS {
        Some(LOGIN_COOLDOWN_SECS - elapsed.max(0))
    } else {
        None
    }
}
