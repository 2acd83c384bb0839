//! Cross-cutting helpers

pub mod logging;
