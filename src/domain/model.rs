use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Value,
}

/// 客戶端保存的登入狀態
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: Value,
}

/// FastAPI 錯誤回應: `detail` 可能是字串或驗證錯誤列表
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ApiErrorBody {
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let messages: Vec<String> = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        Value::Object(obj) => obj
                            .get("msg")
                            .and_then(|m| m.as_str())
                            .map(str::to_string),
                        _ => None,
                    })
                    .collect();
                if messages.is_empty() {
                    None
                } else {
                    Some(messages.join("; "))
                }
            }
            Value::Null => None,
            Value::String(_) => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    Dashboard,
}

impl Page {
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Page::Login => "login.html",
            Page::Dashboard => "dashboard.html",
        }
    }
}

/// UI commands produced by one form submission: alert first, then navigate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub alert: Option<String>,
    pub navigate: Option<Page>,
}

impl Outcome {
    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            alert: Some(message.into()),
            navigate: None,
        }
    }

    pub fn navigate(page: Page) -> Self {
        Self {
            alert: None,
            navigate: Some(page),
        }
    }

    pub fn alert_and_navigate(message: impl Into<String>, page: Page) -> Self {
        Self {
            alert: Some(message.into()),
            navigate: Some(page),
        }
    }

    /// A submission succeeded when it moves the user to another page.
    pub fn is_success(&self) -> bool {
        self.navigate.is_some()
    }
}
