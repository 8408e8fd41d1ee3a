// services/auth.rs
//
// Shared-secret admin gate. The public pages never authenticate; everything
// under /admin sits behind one password checked against ADMIN_PASSWORD and a
// marker cookie with a fixed 7-day expiry. Both sides are traits so the gate
// can be swapped for real per-user auth without touching the handlers.

/// Name of the http-only cookie set after a successful admin login.
pub const ADMIN_COOKIE: &str = "club_admin_session";

/// Cookie lifetime in days.
pub const SESSION_DAYS: i64 = 7;

pub trait CredentialCheck: Send + Sync {
    fn verify(&self, candidate: &str) -> bool;
}

/// Exact-match check against the single shared admin password.
pub struct SharedPassword {
    password: String,
}

impl SharedPassword {
    pub fn new(password: impl Into<String>) -> Self {
        SharedPassword {
            password: password.into(),
        }
    }
}

impl CredentialCheck for SharedPassword {
    fn verify(&self, candidate: &str) -> bool {
        !self.password.is_empty() && candidate == self.password
    }
}

pub trait SessionValidator: Send + Sync {
    /// Token value to store in the session cookie.
    fn issue(&self) -> String;

    /// Whether a presented cookie value grants admin access.
    fn validate(&self, token: &str) -> bool;
}

/// Fixed opaque marker, not a signed token. Presence and exact value are the
/// whole check, matching the shared-password model above.
pub struct MarkerSession {
    marker: String,
}

impl MarkerSession {
    pub fn new() -> Self {
        MarkerSession {
            marker: "authenticated".to_string(),
        }
    }
}

impl Default for MarkerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionValidator for MarkerSession {
    fn issue(&self) -> String {
        self.marker.clone()
    }

    fn validate(&self, token: &str) -> bool {
        token == self.marker
    }
}

/// Core of the admin middleware, kept free of axum types so it can be tested
/// without a running router.
pub fn authorize(token: Option<&str>, sessions: &dyn SessionValidator) -> bool {
    match token {
        Some(value) => sessions.validate(value),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let check = SharedPassword::new("letmein");
        assert!(check.verify("letmein"));
    }

    #[test]
    fn wrong_password_rejected() {
        let check = SharedPassword::new("letmein");
        assert!(!check.verify("letmeout"));
        assert!(!check.verify(""));
    }

    #[test]
    fn empty_configured_password_never_verifies() {
        let check = SharedPassword::new("");
        assert!(!check.verify(""));
    }

    #[test]
    fn issued_marker_round_trips() {
        let sessions = MarkerSession::new();
        let token = sessions.issue();
        assert!(sessions.validate(&token));
    }

    #[test]
    fn foreign_marker_rejected() {
        let sessions = MarkerSession::new();
        assert!(!sessions.validate("forged"));
        assert!(!sessions.validate(""));
    }

    #[test]
    fn missing_cookie_is_unauthorized() {
        let sessions = MarkerSession::new();
        assert!(!authorize(None, &sessions));
        assert!(authorize(Some("authenticated"), &sessions));
    }
}
