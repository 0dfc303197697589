//! Package descriptor model and proxy synthesis.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::resolver::Resolver;

/// Informational fields propagated verbatim from a package descriptor into
/// its proxy. Fields absent in the source are omitted, never defaulted.
pub const PROXY_FIELDS: [&str; 12] = [
    "name",
    "version",
    "description",
    "license",
    "author",
    "contributors",
    "homepage",
    "repository",
    "bugs",
    "engines",
    "os",
    "keywords",
];

/// A parsed package descriptor.
///
/// Field presence and shape are checked through accessors rather than a
/// typed struct: descriptors carry arbitrary extra fields, and an optional
/// field with an unexpected shape is distinct from an absent one.
#[derive(Debug, Clone)]
pub struct Descriptor {
    fields: Map<String, Value>,
}

impl Descriptor {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::DescriptorNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let fields = serde_json::from_str(&content).map_err(|error| Error::Json {
            error,
            context: path.display().to_string(),
        })?;
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Entry-point path, when present with the expected shape.
    pub fn main(&self) -> Option<&str> {
        self.fields.get("main").and_then(Value::as_str)
    }

    /// Serializes the descriptor as pretty-printed UTF-8 JSON with a trailing
    /// newline.
    pub fn to_json(&self) -> Result<String> {
        let mut serialized =
            serde_json::to_string_pretty(&self.fields).map_err(|error| Error::Json {
                error,
                context: "descriptor".to_string(),
            })?;
        serialized.push('\n');
        Ok(serialized)
    }
}

/// Builds the minimal proxy descriptor for a package.
///
/// Allow-listed informational fields are carried over; `name` is blanked so
/// the proxy cannot collide with the naming rules of the published package
/// namespace; `main`, `browser`, and `types` are rewritten to reach back into
/// the real package directory from the shadow location.
///
/// A descriptor without a usable `main` is fatal: the generated proxy would
/// be unusable. An optional field with an unexpected shape is skipped with a
/// diagnostic pushed onto `notices`.
pub fn synthesize_proxy(
    source: &Descriptor,
    relative_path: &str,
    resolver: &Resolver,
    notices: &mut Vec<String>,
) -> Result<Descriptor> {
    let mut proxy = Map::new();
    for field in PROXY_FIELDS {
        if let Some(value) = source.get(field) {
            proxy.insert(field.to_string(), value.clone());
        }
    }
    proxy.insert("name".to_string(), Value::String(String::new()));

    let main = source.main().ok_or_else(|| Error::MissingEntryPoint {
        package: relative_path.to_string(),
    })?;
    proxy.insert(
        "main".to_string(),
        Value::String(resolver.entry_path(relative_path, main)),
    );

    match source.get("browser") {
        None => {}
        Some(Value::String(entry)) => {
            proxy.insert(
                "browser".to_string(),
                Value::String(resolver.entry_path(relative_path, entry)),
            );
        }
        Some(Value::Object(entries)) => {
            // Keys stay as-is; string values are entry paths and get
            // resolved, non-string values (e.g. `false` to disable a module)
            // are not paths and pass through verbatim.
            let mut rewritten = Map::new();
            for (key, value) in entries {
                match value {
                    Value::String(entry) => {
                        rewritten.insert(
                            key.clone(),
                            Value::String(resolver.entry_path(relative_path, entry)),
                        );
                    }
                    other => {
                        rewritten.insert(key.clone(), other.clone());
                    }
                }
            }
            proxy.insert("browser".to_string(), Value::Object(rewritten));
        }
        Some(_) => {
            notices.push(format!(
                "{}: browser field has an unexpected type; skipped",
                relative_path
            ));
        }
    }

    match source.get("types") {
        None => {}
        Some(Value::String(entry)) => {
            proxy.insert(
                "types".to_string(),
                Value::String(resolver.entry_path(relative_path, entry)),
            );
        }
        Some(_) => {
            notices.push(format!(
                "{}: types field has an unexpected type; skipped",
                relative_path
            ));
        }
    }

    Ok(Descriptor::from_fields(proxy))
}
