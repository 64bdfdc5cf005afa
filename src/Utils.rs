//! different utility modules used throughout the project
/// tiny module to set up terminal logging
pub mod logger;
