pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod github;
pub mod models;
pub mod overlay;
pub mod palette;
pub mod render;
pub mod storage;

pub use app::{draw, run};
pub use config::{Config, Overrides};
pub use errors::{AppError, AppResult};
