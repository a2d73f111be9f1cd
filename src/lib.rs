pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod forms;
pub mod import;
pub mod types;

pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
