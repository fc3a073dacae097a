use crate::domain::model::{Page, Session, TOKEN_KEY, USER_KEY};
use crate::domain::ports::StorageBackend;
use crate::utils::error::Result;
use serde_json::{Map, Value};

/// Token and cached user profile on top of a key/value backend.
///
/// Reads never fail: backend errors and unparsable values are logged and
/// reported as absent. Writes propagate backend errors.
pub struct SessionStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn get_token(&self) -> Option<String> {
        match self.backend.get_item(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("⚠️ Unable to read token from storage: {}", e);
                None
            }
        }
    }

    /// 沒有、無法解析或不是物件時回傳 `{}`
    pub fn get_user(&self) -> Value {
        let raw = match self.backend.get_item(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Value::Object(Map::new()),
            Err(e) => {
                tracing::warn!("⚠️ Unable to read user from storage: {}", e);
                return Value::Object(Map::new());
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(user @ Value::Object(_)) => user,
            Ok(other) => {
                tracing::warn!("⚠️ Stored user is not an object, ignoring: {}", other);
                Value::Object(Map::new())
            }
            Err(e) => {
                tracing::warn!("⚠️ Stored user is not valid JSON, ignoring: {}", e);
                Value::Object(Map::new())
            }
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.get_token().map(|token| Session {
            token,
            user: self.get_user(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    /// Two separate writes; a failure between them leaves only the token updated.
    pub fn set_session(&self, token: &str, user: &Value) -> Result<()> {
        self.backend.set_item(TOKEN_KEY, token)?;
        self.replace_user(user)?;
        tracing::debug!("Session saved");
        Ok(())
    }

    pub fn replace_user(&self, user: &Value) -> Result<()> {
        let serialized = serde_json::to_string(user)?;
        self.backend.set_item(USER_KEY, &serialized)
    }

    /// Clears both keys and returns the page to navigate to.
    pub fn logout(&self) -> Result<Page> {
        self.backend.remove_item(TOKEN_KEY)?;
        self.backend.remove_item(USER_KEY)?;
        tracing::info!("👋 Session cleared");
        Ok(Page::Login)
    }
}
