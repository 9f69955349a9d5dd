//! Worker Lambda handler for scheduled syncs

pub mod handler;

// Re-export the main handler for convenience
pub use handler::handler;
