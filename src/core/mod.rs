pub mod controller;
pub mod session_store;

pub use crate::domain::model::{Outcome, Page, Session};
pub use crate::domain::ports::{AuthApi, ConfigProvider, StorageBackend, UserInterface};
pub use crate::utils::error::Result;
