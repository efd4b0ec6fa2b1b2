// Application layer - Resampling engine and profile use cases
pub mod profile_service;
pub mod profile_store;
pub mod resampler;
