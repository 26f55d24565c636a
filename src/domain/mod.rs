// Domain layer - Core types, failure taxonomy and pure policies

pub mod errors;
pub mod model;
pub mod rules;
