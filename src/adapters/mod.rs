// Adapters layer: concrete implementations of the domain ports (storage, http, ui).

pub mod http;
pub mod storage;
pub mod ui;

pub use http::HttpAuthApi;
pub use storage::{FileStorage, MemoryStorage};
pub use ui::ConsoleUi;
