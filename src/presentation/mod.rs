// Presentation layer - HTTP handlers and their shared state
pub mod app_state;
pub mod handlers;
