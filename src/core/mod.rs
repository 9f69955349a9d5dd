//! Configuration, shared data types and watermark persistence

pub mod config;
pub mod models;
pub mod watermark;
