//! Implements [Swagger Responses][responses] of an [`Operation`][super::Operation].
//!
//! [responses]: https://swagger.io/specification/v2/#responses-object
use serde::{
    de::{Error, Unexpected},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::Value;

use super::{
    builder,
    extensions::{Extensions, EXTENSION_PREFIX},
    set_value, DocMap, Schema, SimpleType,
};

const DEFAULT_RESPONSE: &str = "default";

builder! {
    ResponsesBuilder;

    /// Container of the expected responses of an operation.
    ///
    /// Status codes are kept as integers. They serialize back to the string keys used in
    /// documents, with the `default` response written first.
    #[non_exhaustive]
    #[derive(Default, Clone, PartialEq, Debug)]
    pub struct Responses {
        /// Response used for every status code not declared separately.
        pub default: Option<Response>,

        /// Responses by HTTP status code.
        pub status_codes: DocMap<u16, Response>,

        /// Optional extensions "x-something".
        pub extensions: Option<Extensions>,
    }
}

impl Responses {
    /// Construct a new empty [`Responses`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Whether neither a default nor any status code response is declared.
    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.status_codes.is_empty()
    }
}

impl ResponsesBuilder {
    /// Add or change the default [`Response`].
    pub fn default_response<R: Into<Response>>(mut self, response: Option<R>) -> Self {
        set_value!(self default response.map(|response| response.into()))
    }

    /// Add a [`Response`] for the given status code.
    pub fn response<R: Into<Response>>(mut self, code: u16, response: R) -> Self {
        self.status_codes.insert(code, response.into());

        self
    }
}

impl Serialize for Responses {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let extensions_len = self.extensions.as_ref().map_or(0, |extensions| extensions.len());
        let len = usize::from(self.default.is_some()) + self.status_codes.len() + extensions_len;

        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(default) = &self.default {
            map.serialize_entry(DEFAULT_RESPONSE, default)?;
        }
        for (code, response) in &self.status_codes {
            map.serialize_entry(&code.to_string(), response)?;
        }
        if let Some(extensions) = &self.extensions {
            for (key, value) in extensions.iter() {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Responses {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries: DocMap<String, Value> = DocMap::deserialize(deserializer)?;

        let mut responses = Responses::new();
        for (key, value) in entries {
            if key == DEFAULT_RESPONSE {
                responses.default = Some(inline_or_default(value).map_err(D::Error::custom)?);
            } else if key.starts_with(EXTENSION_PREFIX) {
                responses
                    .extensions
                    .get_or_insert_with(Extensions::default)
                    .insert(key, value);
            } else {
                let code = key.parse::<u16>().map_err(|_| {
                    D::Error::invalid_value(
                        Unexpected::Str(&key),
                        &"a status code, `default` or an `x-` extension",
                    )
                })?;
                let response = inline_or_default(value).map_err(D::Error::custom)?;
                responses.status_codes.insert(code, response);
            }
        }

        Ok(responses)
    }
}

/// A status code written without a value is an empty response.
fn inline_or_default(value: Value) -> Result<Response, serde_json::Error> {
    match value {
        Value::Null => Ok(Response::default()),
        value => Response::deserialize(value),
    }
}

builder! {
    ResponseBuilder;

    /// Implements [Swagger Response Object][response].
    ///
    /// A response with a non-empty `$ref` is a reference to a shared response and carries no
    /// content of its own. An empty `description` is left out on serialization, see
    /// [`crate::mixer::descriptions`] for why that matters.
    ///
    /// [response]: https://swagger.io/specification/v2/#response-object
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
    pub struct Response {
        /// Location of the shared response this one points at.
        #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
        pub reference: Option<String>,

        /// Short description of the response. Required by Swagger for inline responses.
        #[serde(
            default,
            deserialize_with = "crate::swagger::null_as_default",
            skip_serializing_if = "String::is_empty"
        )]
        pub description: String,

        /// Structure of the response body.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub schema: Option<Schema>,

        /// Headers sent with the response.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub headers: Option<DocMap<String, Header>>,

        /// Example response bodies by MIME type.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub examples: Option<DocMap<String, Value>>,

        /// Optional extensions "x-something".
        #[serde(skip_serializing_if = "Option::is_none", flatten)]
        pub extensions: Option<Extensions>,
    }
}

impl Response {
    /// Construct a new inline [`Response`] with the given description.
    pub fn new<S: Into<String>>(description: S) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    /// Construct a [`Response`] referencing the shared response `name` of the document.
    pub fn from_response_name<S: AsRef<str>>(name: S) -> Self {
        Self {
            reference: Some(format!("#/responses/{}", name.as_ref())),
            ..Default::default()
        }
    }

    /// Whether this response points elsewhere instead of being defined inline.
    pub fn is_ref(&self) -> bool {
        self.reference
            .as_deref()
            .is_some_and(|reference| !reference.is_empty())
    }
}

impl ResponseBuilder {
    /// Add or change the description of the [`Response`].
    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        set_value!(self description description.into())
    }

    /// Add or change the `$ref` location of the [`Response`].
    pub fn reference<S: Into<String>>(mut self, reference: Option<S>) -> Self {
        set_value!(self reference reference.map(|reference| reference.into()))
    }

    /// Add or change the body [`Schema`] of the [`Response`].
    pub fn schema<I: Into<Schema>>(mut self, schema: Option<I>) -> Self {
        set_value!(self schema schema.map(|schema| schema.into()))
    }

    /// Add a [`Header`] sent with the [`Response`].
    pub fn header<S: Into<String>>(mut self, name: S, header: Header) -> Self {
        self.headers
            .get_or_insert_with(DocMap::new)
            .insert(name.into(), header);

        self
    }
}

/// Header sent with a [`Response`].
#[non_exhaustive]
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct Header {
    /// Short description of the header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Type of the header value.
    #[serde(flatten)]
    pub simple_type: SimpleType,

    /// Optional extensions "x-something".
    #[serde(skip_serializing_if = "Option::is_none", flatten)]
    pub extensions: Option<Extensions>,
}

impl Header {
    /// Construct a new [`Header`] of the given type, e.g. `string` or `integer`.
    pub fn new<S: Into<String>>(header_type: S) -> Self {
        Self {
            simple_type: SimpleType {
                simple_type: Some(header_type.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn responses_deserialize_status_codes_default_and_extensions() -> Result<(), serde_json::Error> {
        let responses: Responses = serde_json::from_value(json!({
            "default": { "description": "unexpected error" },
            "200": { "description": "ok" },
            "404": { "$ref": "#/responses/NotFound" },
            "x-cache": "none"
        }))?;

        assert_eq!(
            responses.default.as_ref().map(|r| r.description.as_str()),
            Some("unexpected error")
        );
        assert_eq!(responses.status_codes[&200].description, "ok");
        assert!(responses.status_codes[&404].is_ref());
        assert_eq!(
            responses.extensions.as_ref().and_then(|e| e.get("x-cache")),
            Some(&json!("none"))
        );

        Ok(())
    }

    #[test]
    fn responses_deserialize_null_as_empty_response() -> Result<(), serde_json::Error> {
        let responses: Responses = serde_json::from_value(json!({
            "200": { "description": null },
            "204": null
        }))?;

        assert_eq!(responses.status_codes[&200], Response::default());
        assert_eq!(responses.status_codes[&204], Response::default());

        Ok(())
    }

    #[test]
    fn responses_reject_unknown_keys() {
        let result = serde_json::from_value::<Responses>(json!({
            "ok": { "description": "ok" }
        }));

        assert!(result.is_err());
    }

    #[test]
    fn serialize_responses_with_string_status_codes() {
        let responses = Responses::builder()
            .default_response(Some(Response::new("error")))
            .response(201, Response::new("created"))
            .response(409, Response::from_response_name("Conflict"))
            .build();

        assert_json_eq!(
            responses,
            json!({
                "default": { "description": "error" },
                "201": { "description": "created" },
                "409": { "$ref": "#/responses/Conflict" }
            })
        );
    }

    #[test]
    fn empty_description_is_not_serialized() {
        assert_json_eq!(Response::new(""), json!({}));
    }

    #[test]
    fn response_is_ref() {
        assert!(Response::from_response_name("NotFound").is_ref());
        assert!(!Response::new("ok").is_ref());
        assert!(!Response::builder().reference(Some("")).build().is_ref());
    }

    #[test]
    fn response_with_header() {
        let response = Response::builder()
            .description("ok")
            .header("X-Rate-Limit", Header::new("integer"))
            .build();

        assert_json_eq!(
            response,
            json!({
                "description": "ok",
                "headers": { "X-Rate-Limit": { "type": "integer" } }
            })
        );
    }
}
