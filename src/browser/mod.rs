//! Headless Chrome host that renders pages and resolves their computed styles

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;
