//! External-key mapping and typed decoding for manifest documents.
//!
//! The spelling of keys in `vex.yml` is decoupled from the in-memory field
//! names: the binding is an explicit [`KeyTable`] handed to the parser, not
//! an attribute baked into the record types. Decoding walks the raw YAML
//! value tree so every failure can name the full external field path.

use serde_yaml::{Mapping, Value};

use vex_util::errors::VexError;

/// Maps internal field paths to the external key spellings used in the
/// source document.
///
/// Internal paths are dot-separated (`"kotlin.enabled"`); a path with no
/// entry in the table is spelled externally by its leaf name.
#[derive(Debug, Clone)]
pub struct KeyTable {
    renames: Vec<(String, String)>,
}

impl KeyTable {
    /// A table with no renames: every field is spelled by its leaf name.
    pub fn empty() -> Self {
        Self {
            renames: Vec::new(),
        }
    }

    /// Build a table from `(internal path, external key)` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            renames: pairs
                .iter()
                .map(|(i, e)| ((*i).to_string(), (*e).to_string()))
                .collect(),
        }
    }

    /// Add or replace the binding for one internal field path.
    pub fn insert(&mut self, internal: &str, external: &str) {
        if let Some(entry) = self.renames.iter_mut().find(|(i, _)| i == internal) {
            entry.1 = external.to_string();
        } else {
            self.renames
                .push((internal.to_string(), external.to_string()));
        }
    }

    fn lookup(&self, internal: &str) -> Option<&str> {
        self.renames
            .iter()
            .find(|(i, _)| i == internal)
            .map(|(_, e)| e.as_str())
    }

    /// External spelling for an internal field path. Falls back to the leaf
    /// segment of the path when the table has no entry for it.
    pub fn external_for<'a>(&'a self, internal: &'a str) -> &'a str {
        self.lookup(internal)
            .unwrap_or_else(|| internal.rsplit('.').next().unwrap_or(internal))
    }
}

impl Default for KeyTable {
    /// The `vex.yml` bindings: every key where the document spelling differs
    /// from the field name.
    fn default() -> Self {
        Self::from_pairs(&[
            ("desugar_enabled", "desugar"),
            ("runtime_dependencies", "runtime_deps"),
            ("kotlin.enabled", "enable"),
        ])
    }
}

/// A mapping node under decode.
///
/// Carries both the internal path (for [`KeyTable`] lookups) and the
/// external path (for diagnostics). An absent or null section decodes as an
/// empty node, so optional fields below it fall back to their defaults and
/// required fields below it report the full missing path.
pub struct Node<'a> {
    map: Option<&'a Mapping>,
    internal_path: String,
    external_path: String,
    keys: &'a KeyTable,
}

impl<'a> Node<'a> {
    /// Wrap the root of a parsed document. An empty document decodes as an
    /// empty mapping; any other non-mapping root is malformed.
    pub fn root(doc: &'a Value, keys: &'a KeyTable) -> Result<Self, VexError> {
        let map = match doc {
            Value::Null => None,
            Value::Mapping(map) => Some(map),
            other => {
                return Err(VexError::MalformedDocument {
                    message: format!("top-level value is {}, expected a mapping", type_name(other)),
                })
            }
        };
        Ok(Self {
            map,
            internal_path: String::new(),
            external_path: String::new(),
            keys,
        })
    }

    fn join_internal(&self, leaf: &str) -> String {
        if self.internal_path.is_empty() {
            leaf.to_string()
        } else {
            format!("{}.{leaf}", self.internal_path)
        }
    }

    fn external_leaf<'s>(&'s self, leaf: &'s str) -> &'s str {
        let full = self.join_internal(leaf);
        self.keys.lookup(&full).unwrap_or(leaf)
    }

    /// Full external path of a field, as spelled in the source document.
    pub fn field_path(&self, leaf: &str) -> String {
        let ext = self.external_leaf(leaf);
        if self.external_path.is_empty() {
            ext.to_string()
        } else {
            format!("{}.{ext}", self.external_path)
        }
    }

    fn get(&self, leaf: &str) -> Option<&'a Value> {
        let map = self.map?;
        let ext = self.external_leaf(leaf);
        map.iter()
            .find(|(k, _)| k.as_str() == Some(ext))
            .map(|(_, v)| v)
    }

    fn missing(&self, leaf: &str) -> VexError {
        VexError::MissingField {
            field: self.field_path(leaf),
        }
    }

    fn mismatch(&self, leaf: &str, expected: &'static str, found: String) -> VexError {
        VexError::TypeMismatch {
            field: self.field_path(leaf),
            expected,
            found,
        }
    }

    /// Descend into a nested mapping. Absent and explicit-null sections
    /// yield an empty node.
    pub fn child(&self, leaf: &str) -> Result<Node<'a>, VexError> {
        let internal_path = self.join_internal(leaf);
        let external_path = self.field_path(leaf);
        let map = match self.get(leaf) {
            None | Some(Value::Null) => None,
            Some(Value::Mapping(map)) => Some(map),
            Some(other) => {
                return Err(self.mismatch(leaf, "a mapping", type_name(other).to_string()))
            }
        };
        Ok(Node {
            map,
            internal_path,
            external_path,
            keys: self.keys,
        })
    }

    pub fn required_str(&self, leaf: &str) -> Result<String, VexError> {
        match self.get(leaf) {
            None | Some(Value::Null) => Err(self.missing(leaf)),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(self.mismatch(leaf, "a string", type_name(other).to_string())),
        }
    }

    pub fn optional_str(&self, leaf: &str) -> Result<Option<String>, VexError> {
        match self.get(leaf) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.mismatch(leaf, "a string", type_name(other).to_string())),
        }
    }

    pub fn required_bool(&self, leaf: &str) -> Result<bool, VexError> {
        match self.get(leaf) {
            None | Some(Value::Null) => Err(self.missing(leaf)),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(self.mismatch(leaf, "a boolean", type_name(other).to_string())),
        }
    }

    pub fn optional_bool(&self, leaf: &str) -> Result<Option<bool>, VexError> {
        match self.get(leaf) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.mismatch(leaf, "a boolean", type_name(other).to_string())),
        }
    }

    pub fn optional_u32(&self, leaf: &str) -> Result<Option<u32>, VexError> {
        let value = match self.get(leaf) {
            None | Some(Value::Null) => return Ok(None),
            Some(value) => value,
        };
        match value.as_u64() {
            Some(n) => u32::try_from(n).map(Some).map_err(|_| {
                self.mismatch(
                    leaf,
                    "a non-negative integer",
                    format!("out-of-range integer {n}"),
                )
            }),
            None => {
                let found = match value {
                    Value::Number(n) => n.to_string(),
                    other => type_name(other).to_string(),
                };
                Err(self.mismatch(leaf, "a non-negative integer", found))
            }
        }
    }

    /// An ordered sequence of strings. Absent and explicit-null fields yield
    /// an empty vector.
    pub fn string_seq(&self, leaf: &str) -> Result<Vec<String>, VexError> {
        let seq = match self.get(leaf) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Sequence(seq)) => seq,
            Some(other) => {
                return Err(self.mismatch(
                    leaf,
                    "a sequence of strings",
                    type_name(other).to_string(),
                ))
            }
        };
        let mut out = Vec::with_capacity(seq.len());
        for (index, element) in seq.iter().enumerate() {
            match element {
                Value::String(s) => out.push(s.clone()),
                other => {
                    return Err(VexError::TypeMismatch {
                        field: format!("{}[{index}]", self.field_path(leaf)),
                        expected: "a string",
                        found: type_name(other).to_string(),
                    })
                }
            }
        }
        Ok(out)
    }

    /// Log a warning for every document key this node's schema does not
    /// declare. `known` lists the internal leaf names declared at this level.
    pub fn warn_unknown(&self, known: &[&str]) {
        let Some(map) = self.map else { return };
        for (key, _) in map {
            let Some(key) = key.as_str() else {
                let section = if self.external_path.is_empty() {
                    "manifest root"
                } else {
                    self.external_path.as_str()
                };
                tracing::warn!("ignoring non-string key in `{section}`");
                continue;
            };
            if !known.iter().any(|leaf| self.external_leaf(leaf) == key) {
                let path = if self.external_path.is_empty() {
                    key.to_string()
                } else {
                    format!("{}.{key}", self.external_path)
                };
                tracing::warn!("ignoring unknown manifest key `{path}`");
            }
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_u64() || n.is_i64() => "integer",
        Value::Number(_) => "floating-point number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
