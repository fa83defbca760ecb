//! Type definitions module
//! 
//! Readings, predictions and alert records shared by the model, store and monitor loop.

pub mod reading;
pub mod prediction;
pub mod alert;

// Re-export commonly used types
pub use reading::{Reading, SensorRange};
pub use prediction::Prediction;
pub use alert::{AlertRecord, NewAlert};
