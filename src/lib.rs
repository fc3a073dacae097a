pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AuthConfig;

pub use adapters::{ConsoleUi, FileStorage, HttpAuthApi, MemoryStorage};
pub use core::{
    controller::{AuthFormController, FormEvent},
    session_store::SessionStore,
};
pub use domain::forms::{LoginForm, RegistrationForm};
pub use domain::model::{Outcome, Page};
pub use utils::error::{AuthError, Result};
