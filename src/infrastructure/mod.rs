// Infrastructure layer - External dependencies and adapters
pub mod compression;
pub mod config;
pub mod file_store;
pub mod http_response;
