//! Block descriptor registry.
//!
//! Marked declarations are not discovered by runtime reflection; the
//! processor stage records them in a sidecar JSON table keyed by declaration
//! identity (kind + name), and the code generation stage reads that table
//! back. This module owns the table's shape and the registry semantics.

use serde::{Deserialize, Serialize};

use vex_util::errors::VexError;

/// Declaration targets a block marker can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Function,
    PropertyGetter,
    PropertySetter,
}

/// One marked declaration in the descriptor table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEntry {
    pub name: String,
    pub kind: BlockKind,

    /// User-level documentation used in place of developer docs. Empty when
    /// the marker carries no description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designer: Option<DesignerAttributes>,
}

impl BlockEntry {
    pub fn new(kind: BlockKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: String::new(),
            designer: None,
        }
    }
}

/// Designer metadata attached to property blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignerAttributes {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_value: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub editor_type: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub editor_args: Vec<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub always_send: bool,
}

/// Insertion-ordered registry of block declarations.
///
/// Identity is (kind, name): a getter and a setter of the same property are
/// distinct declarations, but registering the same identity twice is an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockRegistry {
    entries: Vec<BlockEntry>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration, rejecting duplicates of the same identity.
    pub fn register(&mut self, entry: BlockEntry) -> miette::Result<()> {
        if self.get(entry.kind, &entry.name).is_some() {
            return Err(VexError::DuplicateBlock {
                name: entry.name.clone(),
            }
            .into());
        }
        if !is_pascal_case(&entry.name) {
            tracing::warn!(
                "block `{}` should follow PascalCase naming convention",
                entry.name
            );
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, kind: BlockKind, name: &str) -> Option<&BlockEntry> {
        self.entries
            .iter()
            .find(|e| e.kind == kind && e.name == name)
    }

    /// Declarations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a sidecar descriptor document (a JSON array of entries),
    /// enforcing identity uniqueness.
    pub fn from_json(text: &str) -> miette::Result<Self> {
        let entries: Vec<BlockEntry> =
            serde_json::from_str(text).map_err(|e| VexError::MalformedDocument {
                message: format!("invalid block descriptor document: {e}"),
            })?;
        let mut registry = Self::new();
        for entry in entries {
            registry.register(entry)?;
        }
        Ok(registry)
    }

    /// Serialize to the sidecar descriptor format consumed by codegen.
    pub fn to_json(&self) -> miette::Result<String> {
        serde_json::to_string_pretty(&self.entries).map_err(|e| {
            VexError::MalformedDocument {
                message: format!("failed to serialize block descriptors: {e}"),
            }
            .into()
        })
    }
}

fn is_pascal_case(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && name.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::is_pascal_case;

    #[test]
    fn pascal_case_accepts_block_names() {
        assert!(is_pascal_case("PickFile"));
        assert!(is_pascal_case("Scan"));
        assert!(is_pascal_case("Base64Encode"));
    }

    #[test]
    fn pascal_case_rejects_other_styles() {
        assert!(!is_pascal_case("pickFile"));
        assert!(!is_pascal_case("pick_file"));
        assert!(!is_pascal_case(""));
        assert!(!is_pascal_case("Pick File"));
    }
}
