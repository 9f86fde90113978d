//! Loading documents from files and the load, merge and write flow of the command line tool.
//!
//! Files ending in `.yml` or `.yaml` are read as YAML, everything else as JSON. YAML documents
//! are converted to a JSON tree before the [`Swagger`] model is built from them, so both
//! formats accept exactly the same documents.
use std::{
    ffi::OsStr,
    fmt::{self, Display},
    fs,
    io::Write,
    path::Path,
};

use serde_json::{Map, Number, Value};
use serde_yaml::Value as Yaml;

use crate::{
    error::{Error, Result},
    mixer,
    swagger::Swagger,
};

/// Origin reported in errors of documents parsed with [`from_str`].
const IN_MEMORY: &str = "<memory>";

/// Serialization format of a document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

impl Format {
    /// Select the format from the file suffix, `.yml` and `.yaml` in any case mean YAML.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(OsStr::to_str) {
            Some(extension)
                if extension.eq_ignore_ascii_case("yaml") || extension.eq_ignore_ascii_case("yml") =>
            {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Yaml => f.write_str("YAML"),
        }
    }
}

/// Read and parse the Swagger 2.0 document at `path`.
///
/// Errors name `path`. Line and column are only reported for JSON documents, YAML documents
/// are converted to a JSON tree before the model is built from it and that tree has no
/// positions.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Swagger> {
    let path = path.as_ref();
    let format = Format::from_path(path);
    tracing::debug!(path = %path.display(), %format, "loading document");

    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse(&content, format, path)
}

/// Parse an in memory document. Errors name `<memory>` as the origin.
pub fn from_str(content: &str, format: Format) -> Result<Swagger> {
    parse(content, format, Path::new(IN_MEMORY))
}

/// Load `primary` and `mixins`, merge the mixins into the primary, repair empty response
/// descriptions and write the result as pretty printed JSON to `writer`.
///
/// Returns the number of collisions, see [`mixer::mixin`]. Every document is loaded before
/// anything is merged, the first one failing to load aborts the flow. The merged document is
/// serialized completely before the first byte is written.
pub fn mixin_files<P, M, W>(primary: P, mixins: &[M], mut writer: W) -> Result<usize>
where
    P: AsRef<Path>,
    M: AsRef<Path>,
    W: Write,
{
    let mut primary = load(primary)?;
    let mixins = mixins.iter().map(load).collect::<Result<Vec<_>>>()?;

    let collisions = mixer::mixin(&mut primary, &mixins);
    let repaired = mixer::fix_empty_response_descriptions(&mut primary);
    tracing::debug!(collisions, repaired, "merged {} mixins", mixins.len());

    let merged = serde_json::to_vec_pretty(&primary).map_err(Error::Serialize)?;
    writer.write_all(&merged)?;
    writer.flush()?;

    Ok(collisions)
}

fn parse(content: &str, format: Format, path: &Path) -> Result<Swagger> {
    match format {
        Format::Json => serde_json::from_str(content).map_err(|source| {
            if source.is_data() {
                Error::Document {
                    path: path.to_path_buf(),
                    source,
                }
            } else {
                Error::Json {
                    path: path.to_path_buf(),
                    source,
                }
            }
        }),
        Format::Yaml => {
            let yaml: Yaml = serde_yaml::from_str(content).map_err(|source| Error::Yaml {
                path: path.to_path_buf(),
                source,
            })?;
            let json = yaml_to_json(yaml).map_err(|unsupported| match unsupported {
                Unsupported::Key(key) => Error::YamlKey {
                    path: path.to_path_buf(),
                    key,
                },
                Unsupported::Number(value) => Error::YamlNumber {
                    path: path.to_path_buf(),
                    value,
                },
            })?;

            // built from a tree, so the error carries no line and column
            serde_json::from_value(json).map_err(|source| Error::Document {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// YAML node without a JSON counterpart, in its textual form.
enum Unsupported {
    Key(String),
    Number(String),
}

/// Convert a YAML tree to JSON. Tags are dropped, scalar mapping keys become strings.
fn yaml_to_json(yaml: Yaml) -> std::result::Result<Value, Unsupported> {
    let value = match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(value) => Value::Bool(value),
        Yaml::Number(number) => yaml_number(&number)?,
        Yaml::String(value) => Value::String(value),
        Yaml::Sequence(values) => Value::Array(
            values
                .into_iter()
                .map(yaml_to_json)
                .collect::<std::result::Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    };

    Ok(value)
}

fn yaml_number(number: &serde_yaml::Number) -> std::result::Result<Value, Unsupported> {
    if let Some(value) = number.as_u64() {
        Ok(Value::from(value))
    } else if let Some(value) = number.as_i64() {
        Ok(Value::from(value))
    } else {
        number
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| Unsupported::Number(number.to_string()))
    }
}

fn yaml_key(key: Yaml) -> std::result::Result<String, Unsupported> {
    match key {
        Yaml::String(key) => Ok(key),
        Yaml::Number(number) => Ok(number.to_string()),
        Yaml::Bool(value) => Ok(value.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => yaml_key(tagged.value),
        key @ (Yaml::Sequence(_) | Yaml::Mapping(_)) => {
            let text = match yaml_to_json(key) {
                Ok(json) => json.to_string(),
                Err(Unsupported::Key(text) | Unsupported::Number(text)) => text,
            };
            Err(Unsupported::Key(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    use super::*;
    use crate::{error::ErrorKind, swagger::HttpMethod};

    const WIDGETS_YAML: &str = r#"
swagger: "2.0"
info:
  title: widgets
  version: 1.0.0
paths:
  /widgets:
    get:
      operationId: listWidgets
      responses:
        200:
          description: widgets
        default:
          description: ""
"#;

    struct ClosedWriter;

    impl Write for ClosedWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn format_from_path_uses_suffix() {
        assert_eq!(Format::from_path("api.yaml"), Format::Yaml);
        assert_eq!(Format::from_path("api.yml"), Format::Yaml);
        assert_eq!(Format::from_path("API.YML"), Format::Yaml);
        assert_eq!(Format::from_path("api.json"), Format::Json);
        assert_eq!(Format::from_path("api.yaml.txt"), Format::Json);
        assert_eq!(Format::from_path("api"), Format::Json);
    }

    #[test]
    fn yaml_status_code_keys_load() {
        let swagger = from_str(WIDGETS_YAML, Format::Yaml).expect("yaml document should load");

        let operation = swagger
            .paths
            .get_path_operation("/widgets", HttpMethod::Get)
            .expect("operation should exist");
        assert_eq!(operation.operation_id, "listWidgets");
        assert_eq!(operation.responses.status_codes[&200].description, "widgets");
        assert!(operation.responses.default.is_some());
    }

    #[test]
    fn yaml_unquoted_version_loads() {
        let swagger = from_str(
            "swagger: 2.0\ninfo: {title: api, version: '1'}\npaths: {}\n",
            Format::Yaml,
        );

        assert!(swagger.is_ok(), "unquoted 2.0 should load: {swagger:?}");
    }

    #[test]
    fn yaml_tags_are_dropped() {
        let swagger = from_str(
            "swagger: \"2.0\"\ninfo: {title: !custom api, version: '1'}\npaths: {}\n",
            Format::Yaml,
        )
        .expect("tagged scalar should load");

        assert_eq!(swagger.info.title, "api");
    }

    #[test]
    fn yaml_sequence_key_is_rejected() {
        let error = from_str("? [1, 2]\n: value\n", Format::Yaml).expect_err("should fail");

        assert_eq!(error.kind(), ErrorKind::Load);
        assert_eq!(error.to_string(), "unsupported mapping key in <memory>: [1,2]");
    }

    #[test]
    fn yaml_keys_without_value_load_as_empty() {
        let mut swagger = from_str(
            r#"
swagger: "2.0"
info:
  title: fragment
  version: "1"
paths:
  /a:
    get:
      operationId:
      responses:
        200:
          description:
        204:
  /b:
definitions:
parameters:
responses:
"#,
            Format::Yaml,
        )
        .expect("keys without value should load");

        assert!(swagger.definitions.is_empty());
        assert!(swagger.parameters.is_empty());
        assert!(swagger.responses.is_empty());
        assert_eq!(swagger.paths.get_path_item("/b"), Some(&Default::default()));

        assert_eq!(mixer::fix_empty_response_descriptions(&mut swagger), 2);
        let operation = swagger
            .paths
            .get_path_operation("/a", HttpMethod::Get)
            .expect("operation should exist");
        assert_eq!(operation.operation_id, "");
        assert_eq!(
            operation.responses.status_codes[&200].description,
            mixer::EMPTY_DESCRIPTION
        );
        assert_eq!(
            operation.responses.status_codes[&204].description,
            mixer::EMPTY_DESCRIPTION
        );
    }

    #[test]
    fn json_null_collections_load_as_empty() {
        let swagger = from_str(
            r#"{"swagger": "2.0", "info": {"title": "api", "version": "1"}, "paths": null, "definitions": null}"#,
            Format::Json,
        )
        .expect("null collections should load");

        assert!(swagger.paths.paths.is_empty());
        assert!(swagger.definitions.is_empty());
    }

    #[test]
    fn yaml_infinite_number_is_rejected() {
        let error = from_str(
            "swagger: \"2.0\"\ninfo: {title: api, version: '1'}\npaths: {}\ndefinitions:\n  Big:\n    maximum: .inf\n",
            Format::Yaml,
        )
        .expect_err("infinity has no JSON form");

        assert!(matches!(error, Error::YamlNumber { .. }), "{error:?}");
        assert_eq!(
            error.to_string(),
            "number without JSON representation in <memory>: .inf"
        );
    }

    #[test]
    fn yaml_document_error_names_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("invalid.yaml");
        fs::write(&path, "swagger: \"2.0\"\ninfo: {title: api}\npaths: {}\n").expect("write");

        let error = load(&path).expect_err("info without version should fail");

        assert!(matches!(error, Error::Document { .. }), "{error:?}");
        let message = error.to_string();
        assert!(message.contains("invalid.yaml"), "{message}");
        assert!(message.contains("version"), "{message}");
    }

    #[test]
    fn other_versions_are_rejected() {
        let error = from_str(
            r#"{"swagger": "3.0", "info": {"title": "api", "version": "1"}, "paths": {}}"#,
            Format::Json,
        )
        .expect_err("3.0 is not supported");

        assert!(matches!(error, Error::Document { .. }), "{error:?}");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let error = from_str(r#"{"swagger": "2.0", "#, Format::Json).expect_err("should fail");

        assert!(matches!(error, Error::Json { .. }), "{error:?}");
        assert_eq!(error.kind(), ErrorKind::Load);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.json");

        let error = load(&path).expect_err("missing file should fail");

        assert!(matches!(error, Error::Read { .. }), "{error:?}");
        assert!(error.to_string().contains("missing.json"));
    }

    #[test]
    fn mixin_files_writes_merged_document() {
        let dir = tempfile::tempdir().expect("temp dir");
        let primary = dir.path().join("primary.yaml");
        let mixin = dir.path().join("metadata.json");
        fs::write(&primary, WIDGETS_YAML).expect("write primary");
        fs::write(
            &mixin,
            serde_json::to_vec(&json!({
                "swagger": "2.0",
                "info": { "title": "metadata", "version": "1" },
                "paths": {
                    "/widgets": { "get": { "operationId": "other", "responses": {} } },
                    "/health": {
                        "get": {
                            "operationId": "listWidgets",
                            "responses": { "200": { "description": "" } }
                        }
                    }
                }
            }))
            .expect("serialize mixin"),
        )
        .expect("write mixin");

        let mut output = Vec::new();
        let collisions = mixin_files(&primary, &[&mixin], &mut output).expect("merge should work");

        assert_eq!(collisions, 1);
        let merged: Value = serde_json::from_slice(&output).expect("output is JSON");
        assert_json_eq!(
            merged,
            json!({
                "swagger": "2.0",
                "info": { "title": "widgets", "version": "1.0.0" },
                "paths": {
                    "/health": {
                        "get": {
                            "operationId": "listWidgetsMixin0",
                            "responses": { "200": { "description": "(empty)" } }
                        }
                    },
                    "/widgets": {
                        "get": {
                            "operationId": "listWidgets",
                            "responses": {
                                "default": { "description": "(empty)" },
                                "200": { "description": "widgets" }
                            }
                        }
                    }
                }
            })
        );
        assert!(String::from_utf8_lossy(&output).starts_with("{\n  \"swagger\""));
    }

    #[test]
    fn mixin_files_writes_nothing_on_load_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let primary = dir.path().join("primary.yaml");
        let broken = dir.path().join("broken.json");
        fs::write(&primary, WIDGETS_YAML).expect("write primary");
        fs::write(&broken, "{ not json").expect("write broken");

        let mut output = Vec::new();
        let error = mixin_files(&primary, &[&broken], &mut output).expect_err("should fail");

        assert_eq!(error.kind(), ErrorKind::Load);
        assert!(output.is_empty());
    }

    #[test]
    fn mixin_files_reports_write_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let primary = dir.path().join("primary.yml");
        fs::write(&primary, WIDGETS_YAML).expect("write primary");

        let error = mixin_files(&primary, &[] as &[&Path], ClosedWriter).expect_err("should fail");

        assert_eq!(error.kind(), ErrorKind::Write);
    }
}
