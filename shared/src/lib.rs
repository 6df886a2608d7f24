// Data models and formatting helpers shared by the engine and its consumers.
pub mod models;
pub mod utils;
