// Domain layer - Energy units, intervals, profiles and the conversion table
pub mod conversion;
pub mod error;
pub mod interval;
pub mod profile;
pub mod unit;
