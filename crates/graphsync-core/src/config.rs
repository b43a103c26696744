//! Engine configuration and the deep merge over defaults
//!
//! A [`Configuration`] is a JSON object tree. Fields the engine is known to
//! read are listed in a versioned schema table and type-checked whenever a
//! configuration enters the crate; any other key passes through unchecked.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::OnceLock;

use crate::errors::{GraphSyncError, Result};

/// Version of the known-field table below
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// JSON type of a configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Bool,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "bool",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        }
    }
}

/// Known configuration paths and the JSON types each accepts.
const KNOWN_FIELDS: &[(&str, &[JsonKind])] = &[
    ("physics", &[JsonKind::Object]),
    ("physics.stabilization", &[JsonKind::Bool, JsonKind::Object]),
    ("autoResize", &[JsonKind::Bool]),
    ("edges", &[JsonKind::Object]),
    ("edges.smooth", &[JsonKind::Bool, JsonKind::Object]),
    ("edges.color", &[JsonKind::String, JsonKind::Object]),
    ("edges.width", &[JsonKind::Number]),
    ("edges.arrows", &[JsonKind::Object, JsonKind::String]),
    (
        "edges.arrows.to",
        &[JsonKind::Object, JsonKind::Bool, JsonKind::String],
    ),
    ("edges.arrows.to.enabled", &[JsonKind::Bool]),
    ("edges.arrows.to.scaleFactor", &[JsonKind::Number]),
];

/// Validated configuration tree
///
/// Paths in accessors are dot-separated (`"edges.arrows.to.enabled"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Configuration {
    tree: Map<String, Value>,
}

impl Configuration {
    /// Configuration with no keys set
    pub fn empty() -> Self {
        Self::default()
    }

    /// The fixed default configuration
    ///
    /// Physics stabilization, auto-resize and edge smoothing are off; edges
    /// are black, 0.5 wide, with an arrow at half scale on the `to` end.
    pub fn defaults() -> &'static Configuration {
        static DEFAULTS: OnceLock<Configuration> = OnceLock::new();
        DEFAULTS.get_or_init(|| {
            let tree = json!({
                "physics": {
                    "stabilization": false
                },
                "autoResize": false,
                "edges": {
                    "smooth": false,
                    "color": "#000000",
                    "width": 0.5,
                    "arrows": {
                        "to": {
                            "enabled": true,
                            "scaleFactor": 0.5
                        }
                    }
                }
            });
            match tree {
                Value::Object(tree) => Configuration { tree },
                _ => Configuration::empty(),
            }
        })
    }

    /// Validate a JSON value as a configuration
    ///
    /// `null` is accepted as the empty configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the root is not an object or a known
    /// field has the wrong JSON type.
    pub fn from_value(value: Value) -> Result<Self> {
        let tree = match value {
            Value::Object(tree) => tree,
            Value::Null => Map::new(),
            other => {
                return Err(GraphSyncError::InvalidConfiguration {
                    path: String::new(),
                    reason: format!("expected object, found {}", JsonKind::of(&other).name()),
                })
            }
        };
        validate_tree(&tree)?;
        Ok(Self { tree })
    }

    /// Return a copy with `value` set at `path`, creating parent objects
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the path or one of its segments is
    /// empty, a parent on the path is not an object, or the result fails
    /// validation.
    pub fn with(mut self, path: &str, value: Value) -> Result<Self> {
        let mut segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(GraphSyncError::InvalidConfiguration {
                path: path.to_string(),
                reason: "empty path segment".to_string(),
            });
        }
        let leaf = segments.pop().unwrap_or_default();
        let mut cursor = &mut self.tree;
        for (depth, segment) in segments.iter().enumerate() {
            let entry = cursor
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            cursor = match entry {
                Value::Object(map) => map,
                other => {
                    return Err(GraphSyncError::InvalidConfiguration {
                        path: segments[..=depth].join("."),
                        reason: format!(
                            "cannot descend into {}",
                            JsonKind::of(other).name()
                        ),
                    })
                }
            };
        }
        cursor.insert(leaf.to_string(), value);
        validate_tree(&self.tree)?;
        Ok(self)
    }

    pub fn schema_version(&self) -> u32 {
        CONFIG_SCHEMA_VERSION
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.tree, path)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.tree
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.tree.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn auto_resize(&self) -> Option<bool> {
        self.get("autoResize").and_then(Value::as_bool)
    }

    pub fn physics_stabilization(&self) -> Option<&Value> {
        self.get("physics.stabilization")
    }

    pub fn edge_color(&self) -> Option<&Value> {
        self.get("edges.color")
    }

    pub fn edge_width(&self) -> Option<f64> {
        self.get("edges.width").and_then(Value::as_f64)
    }
}

impl TryFrom<Value> for Configuration {
    type Error = GraphSyncError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<Configuration> for Value {
    fn from(config: Configuration) -> Self {
        Value::Object(config.tree)
    }
}

/// Deep-merge `overrides` onto `defaults`
///
/// Where both sides hold an object the two are merged key by key; anywhere
/// else a value present in `overrides` wins, including arrays and `null`.
/// Keys present only in `defaults` are kept. Neither input is modified.
pub fn merge(defaults: &Configuration, overrides: &Configuration) -> Configuration {
    Configuration {
        tree: merge_maps(&defaults.tree, &overrides.tree),
    }
}

/// User configuration merged over [`Configuration::defaults`]
pub fn effective_configuration(user: &Configuration) -> Configuration {
    merge(Configuration::defaults(), user)
}

fn merge_maps(base: &Map<String, Value>, overrides: &Map<String, Value>) -> Map<String, Value> {
    let mut out = base.clone();
    for (key, value) in overrides {
        let merged = match (out.get(key), value) {
            (Some(Value::Object(b)), Value::Object(o)) => Value::Object(merge_maps(b, o)),
            _ => value.clone(),
        };
        out.insert(key.clone(), merged);
    }
    out
}

fn lookup<'a>(tree: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = tree.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn validate_tree(tree: &Map<String, Value>) -> Result<()> {
    for (path, kinds) in KNOWN_FIELDS {
        if let Some(value) = lookup(tree, path) {
            let found = JsonKind::of(value);
            if !kinds.contains(&found) {
                let expected: Vec<&str> = kinds.iter().map(JsonKind::name).collect();
                return Err(GraphSyncError::InvalidConfiguration {
                    path: (*path).to_string(),
                    reason: format!("expected {}, found {}", expected.join(" or "), found.name()),
                });
            }
        }
    }
    Ok(())
}
