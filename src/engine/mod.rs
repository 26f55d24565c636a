//! Post-processing engine: single operations and directory batches

pub mod batch;
pub mod processor;

pub use batch::{BatchConfig, BatchRunner};
pub use processor::MediaProcessor;
