use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Shared bearer token for authenticated calls.
///
/// Set on login, cleared on logout and whenever the backend answers 401.
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct TokenHolder {
    slot: Arc<RwLock<Option<String>>>,
}

impl TokenHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let holder = Self::new();
        holder.set(token);
        holder
    }

    pub fn get(&self) -> Option<String> {
        match self.slot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        match self.slot.write() {
            Ok(mut guard) => *guard = Some(token),
            Err(poisoned) => *poisoned.into_inner() = Some(token),
        }
    }

    pub fn clear(&self) {
        match self.slot.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Credentials for the login that follows a successful registration
    pub fn credentials(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_token() {
        let holder = TokenHolder::new();
        let shared = holder.clone();
        assert!(!shared.is_present());

        holder.set("abc");
        assert_eq!(shared.get().as_deref(), Some("abc"));

        shared.clear();
        assert!(holder.get().is_none());
    }

    #[test]
    fn register_credentials_reuse_email_and_password() {
        let req = RegisterRequest {
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            phone: "5511".into(),
            email: "ana@example.com".into(),
            password: "secret".into(),
        };
        let login = req.credentials();
        assert_eq!(login.email, "ana@example.com");
        assert_eq!(login.password, "secret");
    }
}
