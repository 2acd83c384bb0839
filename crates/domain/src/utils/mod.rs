//! Pure helper functions

pub mod dates;
