//! Preprocessing pipeline driver
//!
//! Runs the passes in their fixed order, each over the complete output of the
//! previous one:
//!
//! ```text
//! source -> macros -> modules -> flatten (declarations, references) -> output
//! ```
//!
//! Pass failures are returned as [`PipelineError`], a `miette` diagnostic that
//! points into the text the failing pass was reading.

mod config;
mod error;
mod pipeline;

pub use config::{CONFIG_FILE_NAME, MacroSection, ModuleSection, PipelineConfig, PipelineSection, Stage};
pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineOutput, preprocess};
pub use vp_module::PortRedeclaration;
