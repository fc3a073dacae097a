use crate::domain::model::{LoginRequest, LoginResponse, Outcome, Page, RegistrationRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// 類似瀏覽器 localStorage 的鍵值存儲; 每次呼叫各自原子
pub trait StorageBackend: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn page_file_name(&self, page: Page) -> &str;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/register`; the success body is returned as-is.
    async fn register(&self, request: &RegistrationRequest) -> Result<Value>;

    /// `POST /auth/login`
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;

    /// `GET /me` with the bearer token
    async fn fetch_profile(&self, token: &str) -> Result<Value>;

    fn base_url(&self) -> &str;
}

pub trait UserInterface {
    fn alert(&self, message: &str);
    fn navigate(&self, page: Page);

    fn render(&self, outcome: &Outcome) {
        if let Some(message) = &outcome.alert {
            self.alert(message);
        }
        if let Some(page) = outcome.navigate {
            self.navigate(page);
        }
    }
}
