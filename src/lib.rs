mod api;
pub mod args;
pub mod commands;
mod config;
mod error;
mod fetch;
mod gateway;
mod model;
mod report;
mod session;
mod utils;

pub use api::Mode;
pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use session::Session;
