//! SAP response envelope classification

pub mod decoder;
pub mod errors;

pub use decoder::*;
pub use errors::*;
