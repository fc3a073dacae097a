use crate::core::session_store::SessionStore;
use crate::domain::forms::{LoginForm, RegistrationForm};
use crate::domain::model::{Outcome, Page};
use crate::domain::ports::{AuthApi, StorageBackend};
use crate::utils::error::AuthError;

pub const REGISTRATION_SUCCESS: &str = "Registration successful! Redirecting to login…";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const LOGIN_REQUIRED: &str = "Please log in first";
pub const SESSION_EXPIRED: &str = "Session expired, please log in again";
const UNKNOWN_ERROR: &str = "Unknown error";

/// Messages the UI layer sends when the user acts on a form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    RegisterSubmitted(RegistrationForm),
    LoginSubmitted(LoginForm),
    LogoutRequested,
    ProfileRefreshRequested,
}

pub struct AuthFormController<A: AuthApi, B: StorageBackend> {
    api: A,
    session: SessionStore<B>,
}

impl<A: AuthApi, B: StorageBackend> AuthFormController<A, B> {
    pub fn new(api: A, session: SessionStore<B>) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &SessionStore<B> {
        &self.session
    }

    pub async fn handle(&self, event: FormEvent) -> Outcome {
        match event {
            FormEvent::RegisterSubmitted(form) => self.submit_registration(&form).await,
            FormEvent::LoginSubmitted(form) => self.submit_login(&form).await,
            FormEvent::LogoutRequested => self.logout(),
            FormEvent::ProfileRefreshRequested => self.refresh_profile().await,
        }
    }

    pub async fn submit_registration(&self, form: &RegistrationForm) -> Outcome {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("⚠️ Registration rejected before submit: {}", e);
                return Outcome::alert(e.user_friendly_message());
            }
        };

        match self.api.register(&request).await {
            Ok(body) => {
                tracing::info!("✅ Registered successfully: {}", body);
                Outcome::alert_and_navigate(REGISTRATION_SUCCESS, Page::Login)
            }
            Err(e) => {
                tracing::error!("❌ Registration failed: {}", e);
                Outcome::alert(self.failure_message("Registration failed", &e))
            }
        }
    }

    pub async fn submit_login(&self, form: &LoginForm) -> Outcome {
        let request = form.to_request();

        let response = match self.api.login(&request).await {
            Ok(response) => response,
            Err(e) if e.status() == Some(401) => {
                tracing::warn!("⚠️ Invalid credentials");
                return Outcome::alert(INVALID_CREDENTIALS);
            }
            Err(e) => {
                tracing::error!("❌ Login failed: {}", e);
                return Outcome::alert(self.failure_message("Login failed", &e));
            }
        };

        if let Err(e) = self.session.set_session(&response.token, &response.user) {
            tracing::error!("❌ Unable to save session: {}", e);
            return Outcome::alert("Login failed: Unable to save session");
        }

        tracing::info!("✅ Login successful for {}", request.email);
        Outcome::navigate(Page::Dashboard)
    }

    pub fn logout(&self) -> Outcome {
        match self.session.logout() {
            Ok(page) => Outcome::navigate(page),
            Err(e) => {
                tracing::error!("❌ Logout failed: {}", e);
                Outcome::alert(format!("Logout failed: {}", e.user_friendly_message()))
            }
        }
    }

    /// 用已保存的 token 重新取得個人資料; 401 代表 token 已失效
    pub async fn refresh_profile(&self) -> Outcome {
        let Some(session) = self.session.session() else {
            return Outcome::alert_and_navigate(LOGIN_REQUIRED, Page::Login);
        };

        match self.api.fetch_profile(&session.token).await {
            Ok(profile) => match self.session.replace_user(&profile) {
                Ok(()) => {
                    tracing::info!("🔄 Profile refreshed");
                    Outcome::default()
                }
                Err(e) => {
                    tracing::error!("❌ Unable to save profile: {}", e);
                    Outcome::alert("Profile refresh failed: Unable to save session")
                }
            },
            Err(e) if e.status() == Some(401) => {
                tracing::warn!("⚠️ Token rejected, clearing session");
                if let Err(e) = self.session.logout() {
                    tracing::error!("❌ Unable to clear session: {}", e);
                }
                Outcome::alert_and_navigate(SESSION_EXPIRED, Page::Login)
            }
            Err(e) => {
                tracing::error!("❌ Profile refresh failed: {}", e);
                Outcome::alert(self.failure_message("Profile refresh failed", &e))
            }
        }
    }

    fn failure_message(&self, prefix: &str, error: &AuthError) -> String {
        match error {
            AuthError::NetworkError(_) => connectivity_message(self.api.base_url()),
            AuthError::ApiError { detail, .. } => format!(
                "{}: {}",
                prefix,
                detail.as_deref().unwrap_or(UNKNOWN_ERROR)
            ),
            other => format!("{}: {}", prefix, other.user_friendly_message()),
        }
    }
}

pub fn connectivity_message(api_url: &str) -> String {
    format!("Server error: Unable to reach API at {}.", api_url)
}
