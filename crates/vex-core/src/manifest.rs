use std::path::Path;

use serde_yaml::{Mapping, Value};

use vex_util::errors::VexError;

use crate::dependency::Coordinate;
use crate::schema::{KeyTable, Node};
use crate::{DEFAULT_KOTLIN_VERSION, MANIFEST_FILENAME};

/// Compile SDK level applied when the manifest omits `android.compile_sdk`.
pub const DEFAULT_COMPILE_SDK: u32 = 31;

/// Minimum SDK level applied when the manifest omits `android.min_sdk`.
pub const DEFAULT_MIN_SDK: u32 = 7;

/// The parsed representation of a `vex.yml` file.
///
/// Constructed once per load, immutable afterwards. Field names are the
/// internal spellings; the document spellings are bound by the [`KeyTable`]
/// passed to the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Extension version. Required and non-empty.
    pub version: String,

    pub license: String,

    pub homepage: String,

    /// Toggles the downstream bytecode desugaring transform.
    pub desugar_enabled: bool,

    /// Relative paths of files bundled with the extension, in declaration order.
    pub assets: Vec<String>,

    pub authors: Vec<String>,

    /// `group:artifact:version` coordinate strings, resolved externally.
    pub runtime_dependencies: Vec<String>,

    pub android: AndroidConfig,

    pub kotlin: KotlinConfig,
}

/// Android SDK levels from the `android` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidConfig {
    pub compile_sdk: u32,
    pub min_sdk: u32,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            compile_sdk: DEFAULT_COMPILE_SDK,
            min_sdk: DEFAULT_MIN_SDK,
        }
    }
}

/// Kotlin toolchain settings from the `kotlin` section.
///
/// There is no default for the whole section: `enable` must be spelled out
/// in every manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KotlinConfig {
    pub enabled: bool,
    pub version: String,
}

impl KotlinConfig {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            version: DEFAULT_KOTLIN_VERSION.to_string(),
        }
    }
}

impl Manifest {
    /// Parse manifest text with the standard `vex.yml` key bindings.
    pub fn parse(text: &str) -> miette::Result<Self> {
        Self::parse_with_keys(text, &KeyTable::default())
    }

    /// Parse manifest text with an explicit external-key table.
    ///
    /// All-or-nothing: any missing required field, unconvertible value, or
    /// syntax error fails the whole load. Unknown keys are skipped with a
    /// warning.
    pub fn parse_with_keys(text: &str, keys: &KeyTable) -> miette::Result<Self> {
        let doc: Value = serde_yaml::from_str(text).map_err(|e| VexError::MalformedDocument {
            message: e.to_string(),
        })?;
        let root = Node::root(&doc, keys)?;
        root.warn_unknown(&[
            "version",
            "license",
            "homepage",
            "desugar_enabled",
            "assets",
            "authors",
            "runtime_dependencies",
            "android",
            "kotlin",
        ]);

        let version = root.required_str("version")?;
        if version.trim().is_empty() {
            return Err(VexError::MissingField {
                field: root.field_path("version"),
            }
            .into());
        }

        let android_node = root.child("android")?;
        android_node.warn_unknown(&["compile_sdk", "min_sdk"]);
        let defaults = AndroidConfig::default();
        let android = AndroidConfig {
            compile_sdk: android_node
                .optional_u32("compile_sdk")?
                .unwrap_or(defaults.compile_sdk),
            min_sdk: android_node
                .optional_u32("min_sdk")?
                .unwrap_or(defaults.min_sdk),
        };

        let kotlin_node = root.child("kotlin")?;
        kotlin_node.warn_unknown(&["enabled", "version"]);
        let kotlin = KotlinConfig {
            enabled: kotlin_node.required_bool("enabled")?,
            version: kotlin_node
                .optional_str("version")?
                .unwrap_or_else(|| DEFAULT_KOTLIN_VERSION.to_string()),
        };

        Ok(Self {
            version,
            license: root.optional_str("license")?.unwrap_or_default(),
            homepage: root.optional_str("homepage")?.unwrap_or_default(),
            desugar_enabled: root.optional_bool("desugar_enabled")?.unwrap_or(false),
            assets: root.string_seq("assets")?,
            authors: root.string_seq("authors")?,
            runtime_dependencies: root.string_seq("runtime_dependencies")?,
            android,
            kotlin,
        })
    }

    /// Load and parse a `vex.yml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        tracing::debug!("loading manifest from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(VexError::Io)?;
        Self::parse(&content)
    }

    /// Locate the nearest `vex.yml` walking up from `start` and load it.
    pub fn discover(start: &Path) -> miette::Result<Self> {
        let Some(path) = vex_util::fs::find_in_ancestors(start, MANIFEST_FILENAME) else {
            return Err(VexError::ManifestNotFound {
                start: start.to_path_buf(),
            }
            .into());
        };
        Self::from_path(&path)
    }

    /// Serialize back to manifest text with the standard key bindings.
    ///
    /// Emits every field under its external spelling, so reloading the
    /// output yields an identical manifest.
    pub fn to_yaml(&self) -> miette::Result<String> {
        self.to_yaml_with_keys(&KeyTable::default())
    }

    /// Serialize back to manifest text with an explicit external-key table.
    pub fn to_yaml_with_keys(&self, keys: &KeyTable) -> miette::Result<String> {
        let string = |s: &str| Value::String(s.to_string());
        let string_seq = |items: &[String]| {
            Value::Sequence(items.iter().map(|s| string(s)).collect())
        };

        let mut android = Mapping::new();
        android.insert(
            string(keys.external_for("android.compile_sdk")),
            Value::Number(self.android.compile_sdk.into()),
        );
        android.insert(
            string(keys.external_for("android.min_sdk")),
            Value::Number(self.android.min_sdk.into()),
        );

        let mut kotlin = Mapping::new();
        kotlin.insert(
            string(keys.external_for("kotlin.enabled")),
            Value::Bool(self.kotlin.enabled),
        );
        kotlin.insert(
            string(keys.external_for("kotlin.version")),
            string(&self.kotlin.version),
        );

        let mut root = Mapping::new();
        root.insert(string(keys.external_for("version")), string(&self.version));
        root.insert(string(keys.external_for("license")), string(&self.license));
        root.insert(
            string(keys.external_for("homepage")),
            string(&self.homepage),
        );
        root.insert(
            string(keys.external_for("desugar_enabled")),
            Value::Bool(self.desugar_enabled),
        );
        root.insert(string(keys.external_for("assets")), string_seq(&self.assets));
        root.insert(
            string(keys.external_for("authors")),
            string_seq(&self.authors),
        );
        root.insert(
            string(keys.external_for("runtime_dependencies")),
            string_seq(&self.runtime_dependencies),
        );
        root.insert(string(keys.external_for("android")), Value::Mapping(android));
        root.insert(string(keys.external_for("kotlin")), Value::Mapping(kotlin));

        serde_yaml::to_string(&Value::Mapping(root)).map_err(|e| {
            VexError::MalformedDocument {
                message: format!("failed to serialize manifest: {e}"),
            }
            .into()
        })
    }

    /// Check the contract invariants the bare data shape cannot express.
    ///
    /// Unparsable `runtime_deps` entries are warned about rather than
    /// rejected; their resolution belongs to an external collaborator.
    pub fn validate(&self) -> miette::Result<()> {
        if self.android.min_sdk > self.android.compile_sdk {
            return Err(VexError::InvalidSdkRange {
                min_sdk: self.android.min_sdk,
                compile_sdk: self.android.compile_sdk,
            }
            .into());
        }
        if !is_valid_version(&self.version) {
            return Err(VexError::InvalidVersionFormat {
                value: self.version.clone(),
            }
            .into());
        }
        for dep in &self.runtime_dependencies {
            if Coordinate::parse(dep).is_none() {
                tracing::warn!("runtime dependency `{dep}` is not in group:artifact:version form");
            }
        }
        Ok(())
    }
}

/// Dotted numeric segments with an optional `-` or `+` suffix:
/// `1`, `1.0`, `2.3.1`, `1.0-rc1`, `1.0.0+build5`.
fn is_valid_version(s: &str) -> bool {
    let (numeric, suffix) = match s.find(['-', '+']) {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };
    let segments_ok = !numeric.is_empty()
        && numeric
            .split('.')
            .all(|seg| !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_digit()));
    let suffix_ok = match suffix {
        None => true,
        Some("") => false,
        Some(sfx) => sfx
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-'),
    };
    segments_ok && suffix_ok
}
