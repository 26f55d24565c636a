//! Files written next to the downloaded clips for manual re-upload

pub mod instructions;
pub mod metadata;

pub use instructions::{InstructionsWriter, INSTRUCTIONS_FILE};
pub use metadata::{ClipMetadata, MetadataWriter};
