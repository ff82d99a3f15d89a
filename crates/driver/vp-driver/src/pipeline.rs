//! Stage sequencing

use crate::{PipelineConfig, PipelineError, Stage};
use log::{debug, info};
use vp_flatten::{ReferenceRewriter, WireTable, flatten_declarations};
use vp_macro::MacroExpansionContext;
use vp_module::ModuleRedeclarer;

/// Result of a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Transformed text
    pub text: String,
    /// Last stage that ran
    pub last_stage: Stage,
    /// Number of macros defined
    pub macros: usize,
    /// Number of module headers rewritten
    pub modules: usize,
    /// Flattened wires
    pub wires: WireTable,
    /// Number of references rewritten
    pub references: usize,
}

/// Runs the passes under one configuration
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    source_name: String,
}

impl Pipeline {
    /// Create a pipeline for `config`
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            source_name: "<input>".to_string(),
        }
    }

    /// Name used for the input in diagnostics
    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every configured stage over `source`
    ///
    /// # Errors
    ///
    /// Returns the first pass failure, wrapped with the text that pass read.
    pub fn run(&self, source: &str) -> Result<PipelineOutput, PipelineError> {
        let stop_after = self.config.pipeline.stop_after;
        let mut output = PipelineOutput {
            text: String::new(),
            last_stage: Stage::Macros,
            macros: 0,
            modules: 0,
            wires: WireTable::new(),
            references: 0,
        };

        let mut expander =
            MacroExpansionContext::with_passthrough(self.config.macros.passthrough.iter().cloned());
        let expanded = expander
            .expand_source(source)
            .map_err(|error| PipelineError::macros(error, &self.source_name, source))?;
        output.macros = expander.table().len();
        debug!("stage {}: {} macro(s) defined", Stage::Macros, output.macros);
        if stop_after == Stage::Macros {
            output.text = expanded;
            return Ok(output);
        }

        let mut redeclarer = ModuleRedeclarer::new(self.config.modules.redeclare_ports);
        let redeclared = redeclarer.redeclare_source(&expanded).map_err(|error| {
            PipelineError::modules(error, &self.stage_name("after macro expansion"), &expanded)
        })?;
        output.modules = redeclarer.modules();
        output.last_stage = Stage::Modules;
        debug!("stage {}: {} module header(s)", Stage::Modules, output.modules);
        if stop_after == Stage::Modules {
            output.text = redeclared;
            return Ok(output);
        }

        let declared = flatten_declarations(&redeclared, &mut output.wires).map_err(|error| {
            PipelineError::flatten(error, &self.stage_name("after module redeclaration"), &redeclared)
        })?;
        output.text = if output.wires.is_empty() {
            declared
        } else {
            let mut rewriter = ReferenceRewriter::new(&output.wires);
            let rewritten = rewriter.rewrite_source(&declared).map_err(|error| {
                PipelineError::flatten(error, &self.stage_name("after wire declarations"), &declared)
            })?;
            output.references = rewriter.rewrites();
            rewritten
        };
        output.last_stage = Stage::Flatten;
        debug!(
            "stage {}: {} wire(s), {} reference(s)",
            Stage::Flatten,
            output.wires.len(),
            output.references
        );

        info!(
            "preprocessed {} ({} bytes in, {} bytes out)",
            self.source_name,
            source.len(),
            output.text.len()
        );
        Ok(output)
    }

    /// Diagnostic name for an intermediate text
    fn stage_name(&self, label: &str) -> String {
        format!("{} ({label})", self.source_name)
    }
}

/// Run the full pipeline with the default configuration
///
/// # Errors
///
/// See [`Pipeline::run`].
pub fn preprocess(source: &str) -> Result<String, PipelineError> {
    Pipeline::new(PipelineConfig::default())
        .run(source)
        .map(|output| output.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vp_module::PortRedeclaration;

    const SOURCE: &str = "`define W 8\n\
                          module top(input clk, output q);\n\
                          reg [`W-1:0] mem [0:1];\n\
                          assign q = mem[1][0];\n\
                          endmodule\n";

    fn config(stop_after: Stage, redeclare_ports: PortRedeclaration) -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.pipeline.stop_after = stop_after;
        config.modules.redeclare_ports = redeclare_ports;
        config
    }

    #[test]
    fn test_full_pipeline() {
        let output = Pipeline::new(PipelineConfig::default()).run(SOURCE).unwrap();
        assert_eq!(
            output.text,
            "module top(input clk,\noutput q);\n\
             reg [7:0] mem_0;\nreg [7:0] mem_1;\n\n\
             assign q = mem_1[0];\n\
             endmodule\n"
        );
        assert_eq!(output.last_stage, Stage::Flatten);
        assert_eq!(output.macros, 1);
        assert_eq!(output.modules, 1);
        assert_eq!(output.wires.len(), 1);
        assert_eq!(output.references, 1);
    }

    #[test]
    fn test_stop_after_macros() {
        let output = Pipeline::new(config(Stage::Macros, PortRedeclaration::Never))
            .run(SOURCE)
            .unwrap();
        assert_eq!(output.last_stage, Stage::Macros);
        assert!(output.text.contains("module top(input clk, output q);"));
        assert!(output.text.contains("reg [8-1:0] mem [0:1];"));
    }

    #[test]
    fn test_stop_after_modules() {
        let output = Pipeline::new(config(Stage::Modules, PortRedeclaration::Auto))
            .run(SOURCE)
            .unwrap();
        assert_eq!(output.last_stage, Stage::Modules);
        assert!(output.text.starts_with("module top(clk,\nq);\ninput clk;\noutput q;\n"));
        assert!(output.wires.is_empty());
    }

    #[test]
    fn test_macro_error_points_at_input() {
        let err = Pipeline::new(PipelineConfig::default())
            .with_source_name("top.v")
            .run("wire `W;\n")
            .unwrap_err();
        assert_eq!(err.stage(), Stage::Macros);
        assert_eq!(err.span(), miette::SourceSpan::from((5, 1)));
    }

    #[test]
    fn test_flatten_error_points_at_intermediate_text() {
        let err = preprocess("`define N 4\nreg [7:0] m [`N/0:0];\n").unwrap_err();
        assert_eq!(err.stage(), Stage::Flatten);
        assert!(matches!(err, PipelineError::Flatten { .. }));
    }

    #[test]
    fn test_preprocess_is_idempotent() {
        let once = preprocess(SOURCE).unwrap();
        assert_eq!(preprocess(&once).unwrap(), once);
    }
}
