//! Asset helper scripts: DOCX command extraction and icon set generation.

pub mod cli;
pub mod error;
pub mod extract;
pub mod icons;
pub mod logging;
pub mod printer;
pub mod utils;

pub use error::ToolError;
