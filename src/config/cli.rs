use crate::config::toml_config::AuthConfig;
use crate::core::controller::FormEvent;
use crate::domain::forms::{LoginForm, RegistrationForm};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "vsx-auth.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "vsx-auth")]
#[command(about = "Register, log in and manage the local VSXchangeZA session")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, env = "VSX_CONFIG")]
    pub config: Option<String>,

    /// Override api.base_url
    #[arg(long, env = "VSX_API_URL")]
    pub api_url: Option<String>,

    /// Override storage.path
    #[arg(long, env = "VSX_STORAGE_PATH")]
    pub storage_path: Option<String>,

    /// Override api.timeout_seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create an account, then go to the login page
    Register {
        /// Full name; the first word becomes the first name
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "VSX_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long)]
        role: Option<String>,
    },
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "VSX_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Print the stored user profile
    Whoami,
    /// Print the stored token
    Token,
    /// Fetch the profile from the API with the stored token
    Profile,
}

impl Command {
    /// Form submissions become controller events; local reads return `None`.
    pub fn to_event(&self) -> Option<FormEvent> {
        match self {
            Command::Register {
                name,
                email,
                password,
                confirm_password,
                role,
            } => Some(FormEvent::RegisterSubmitted(RegistrationForm {
                full_name: name.clone(),
                email: email.clone(),
                password: password.clone(),
                confirm_password: confirm_password.clone(),
                role: role.clone(),
            })),
            Command::Login { email, password } => Some(FormEvent::LoginSubmitted(LoginForm {
                email: email.clone(),
                password: password.clone(),
            })),
            Command::Logout => Some(FormEvent::LogoutRequested),
            Command::Profile => Some(FormEvent::ProfileRefreshRequested),
            Command::Whoami | Command::Token => None,
        }
    }
}

impl CliConfig {
    /// 載入配置檔 (沒有指定且預設檔不存在時使用預設值), 再套用命令列覆蓋
    pub fn resolve(&self) -> Result<AuthConfig> {
        let mut config = match &self.config {
            Some(path) => AuthConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                AuthConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => AuthConfig::default(),
        };

        if let Some(api_url) = &self.api_url {
            config.api.base_url = api_url.clone();
        }
        if let Some(storage_path) = &self.storage_path {
            config.storage.path = storage_path.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.api.timeout_seconds = Some(timeout);
        }

        Ok(config)
    }
}
