//! Registry of flattened wires

use crate::WireInfo;
use indexmap::IndexMap;

/// Flattened wires keyed by name, in declaration order
#[derive(Debug, Default, Clone)]
pub struct WireTable {
    wires: IndexMap<String, WireInfo>,
}

impl WireTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a wire shape
    ///
    /// Returns `false`, keeping the earlier shape, when the name is taken.
    pub fn insert(&mut self, wire: WireInfo) -> bool {
        if self.wires.contains_key(&wire.name) {
            return false;
        }
        self.wires.insert(wire.name.clone(), wire);
        true
    }

    /// Look up a wire by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&WireInfo> {
        self.wires.get(name)
    }

    /// Registered names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.wires.keys().map(String::as_str)
    }

    /// Number of registered wires
    #[must_use]
    pub fn len(&self) -> usize {
        self.wires.len()
    }

    /// Returns true when no wire has been flattened
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dimension;

    fn wire(name: &str, upper: u64) -> WireInfo {
        WireInfo {
            name: name.to_string(),
            ty: "wire".to_string(),
            dimensions: vec![Dimension::new(7, 0), Dimension::new(upper, 0)],
        }
    }

    #[test]
    fn test_keeps_first_shape_and_order() {
        let mut table = WireTable::new();
        assert!(table.insert(wire("b", 3)));
        assert!(table.insert(wire("a", 1)));
        assert!(!table.insert(wire("b", 9)));

        assert_eq!(table.len(), 2);
        assert_eq!(table.names().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(
            table.get("b").map(|info| info.dimensions[1]),
            Some(Dimension::new(0, 3))
        );
    }
}
