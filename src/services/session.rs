use std::sync::RwLock;

/// Supplies the ambient bearer credential for authenticated calls.
///
/// The credential is owned by the external auth service; nothing in this
/// crate mutates it beyond the user replacing their own in-memory copy.
pub trait SessionProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Session token held in memory, set after login or pasted by the operator.
#[derive(Default)]
pub struct MemorySession {
    token: RwLock<Option<String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.into());
    }

    pub fn clear(&self) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}

impl SessionProvider for MemorySession {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// Reads the session token from the environment on every call, so a token
/// exported mid-session is picked up without a restart.
pub struct EnvSession {
    var: String,
}

impl EnvSession {
    pub const DEFAULT_VAR: &'static str = "VAULT_SESSION_TOKEN";

    pub fn new() -> Self {
        Self {
            var: Self::DEFAULT_VAR.to_string(),
        }
    }

    pub fn from_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProvider for EnvSession {
    fn token(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_session_set_and_clear() {
        let session = MemorySession::new();
        assert_eq!(session.token(), None);
        session.set_token("jwt-abc");
        assert_eq!(session.token(), Some("jwt-abc".to_string()));
        session.clear();
        assert_eq!(session.token(), None);
    }
}
