mod app_state;
mod config;

pub use app_state::AppState;
pub use config::{ColorChoice, FetchConfig};
