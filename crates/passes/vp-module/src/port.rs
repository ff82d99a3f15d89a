//! A single entry of a module port list

use vp_stream::{is_space, trim};

/// Direction keywords recognised in a port descriptor
const DIRECTIONS: [&str; 3] = ["input", "output", "inout"];

/// A port descriptor split into its type and name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    /// Descriptor exactly as it appeared in the list, trimmed
    pub descriptor: String,
    /// Everything before the last whitespace, e.g. `output reg [7:0]`
    pub kind: String,
    /// Text after the last whitespace
    pub name: String,
}

impl Port {
    /// Splits a descriptor at its last whitespace
    ///
    /// A descriptor without whitespace is a bare name with an empty kind.
    #[must_use]
    pub fn parse(descriptor: &str) -> Self {
        let descriptor = trim(descriptor);
        let (kind, name) = descriptor
            .rfind(is_space)
            .map_or(("", descriptor), |split| descriptor.split_at(split));
        Self {
            descriptor: descriptor.to_string(),
            kind: trim(kind).to_string(),
            name: trim(name).to_string(),
        }
    }

    /// Returns true when the kind contains a direction keyword as a word
    #[must_use]
    pub fn has_direction(&self) -> bool {
        self.kind
            .split(is_space)
            .any(|word| DIRECTIONS.contains(&word))
    }

    /// Statements declaring this port inside the module body
    ///
    /// An `output reg` port becomes an `output` line and a `reg` line that both
    /// carry the remaining type text. Any other port is declared as written.
    #[must_use]
    pub fn declarations(&self) -> Vec<String> {
        if let Some(output_at) = self.kind.find("output") {
            let after_output = output_at + "output".len();
            if let Some(reg_at) = self.kind[after_output..].find("reg") {
                let rest = &self.kind[after_output + reg_at + "reg".len()..];
                return vec![
                    format!("output{rest} {};", self.name),
                    format!("reg   {rest} {};", self.name),
                ];
            }
        }
        vec![format!("{};", self.descriptor)]
    }
}
