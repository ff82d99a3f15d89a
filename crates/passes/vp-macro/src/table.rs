//! Name to definition mapping built in stream order

use crate::MacroDef;
use rustc_hash::FxHashMap;

/// Macros defined so far in the current pass
///
/// Definitions are only ever added. A second definition of a name is ignored
/// so that the first one stays in force.
#[derive(Debug, Default, Clone)]
pub struct MacroTable {
    macros: FxHashMap<String, MacroDef>,
}

impl MacroTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a macro definition
    ///
    /// Returns `false`, leaving the table unchanged, when the name is taken.
    pub fn register(&mut self, macro_def: MacroDef) -> bool {
        if self.macros.contains_key(&macro_def.name) {
            return false;
        }
        self.macros.insert(macro_def.name.clone(), macro_def);
        true
    }

    /// Look up a macro by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MacroDef> {
        self.macros.get(name)
    }

    /// Number of registered macros
    #[must_use]
    pub fn len(&self) -> usize {
        self.macros.len()
    }

    /// Returns true when nothing has been defined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}
