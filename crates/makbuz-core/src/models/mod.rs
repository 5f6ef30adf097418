//! Data models for receipt extraction results and configuration.

pub mod config;
pub mod receipt;
