//! Implements [Swagger Paths Object][paths] types.
//!
//! [paths]: https://swagger.io/specification/v2/#paths-object
use std::fmt::{self, Display};

use serde::{de::Error, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{
    builder,
    extensions::{Extensions, EXTENSION_PREFIX},
    response::{Response, Responses},
    set_value, Deprecated, DocMap, ExternalDocs, Parameter, RefOr, Scheme, SecurityRequirement,
};

builder! {
    PathsBuilder;

    /// Implements [Swagger Paths Object][paths].
    ///
    /// Holds relative paths to matching endpoints and operations. Path templates are used as
    /// they are, `/widgets` and `/Widgets/` are two different paths.
    ///
    /// [paths]: https://swagger.io/specification/v2/#paths-object
    #[non_exhaustive]
    #[derive(Serialize, Default, Clone, PartialEq, Debug)]
    pub struct Paths {
        /// Map of relative paths with [`PathItem`]s holding [`Operation`]s matching
        /// api endpoints.
        #[serde(flatten)]
        pub paths: DocMap<String, PathItem>,

        /// Optional extensions "x-something".
        #[serde(skip_serializing_if = "Option::is_none", flatten)]
        pub extensions: Option<Extensions>,
    }
}

impl Paths {
    /// Construct a new [`Paths`] object.
    pub fn new() -> Self {
        Default::default()
    }

    /// Return _`Option`_ of reference to [`PathItem`] by given relative path _`P`_ if one exists
    /// in [`Paths::paths`] map. Otherwise will return `None`.
    pub fn get_path_item<P: AsRef<str>>(&self, path: P) -> Option<&PathItem> {
        self.paths.get(path.as_ref())
    }

    /// Return _`Option`_ of reference to [`Operation`] from map of paths or `None` if not found.
    pub fn get_path_operation<P: AsRef<str>>(
        &self,
        path: P,
        http_method: HttpMethod,
    ) -> Option<&Operation> {
        self.paths
            .get(path.as_ref())
            .and_then(|path| path.operation(http_method))
    }
}

impl<'de> Deserialize<'de> for Paths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries: DocMap<String, Value> = DocMap::deserialize(deserializer)?;

        let mut paths = Paths::new();
        for (key, value) in entries {
            if key.starts_with(EXTENSION_PREFIX) {
                paths
                    .extensions
                    .get_or_insert_with(Extensions::default)
                    .insert(key, value);
            } else {
                let item = match value {
                    Value::Null => PathItem::default(),
                    value => PathItem::deserialize(value).map_err(D::Error::custom)?,
                };
                paths.paths.insert(key, item);
            }
        }

        Ok(paths)
    }
}

impl PathsBuilder {
    /// Append [`PathItem`] with path to map of paths. An existing item for the same path
    /// is replaced.
    pub fn path<I: Into<String>>(mut self, path: I, item: PathItem) -> Self {
        self.paths.insert(path.into(), item);

        self
    }

    /// Add extensions to the paths section.
    pub fn extensions(mut self, extensions: Option<Extensions>) -> Self {
        set_value!(self extensions extensions)
    }
}

builder! {
    PathItemBuilder;

    /// Implements [Swagger Path Item Object][path_item] what describes [`Operation`]s available on
    /// a single path.
    ///
    /// [path_item]: https://swagger.io/specification/v2/#path-item-object
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct PathItem {
        /// Location of an external definition of this path item.
        #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
        pub reference: Option<String>,

        /// Get [`Operation`] for the [`PathItem`].
        #[serde(skip_serializing_if = "Option::is_none")]
        pub get: Option<Operation>,

        /// Put [`Operation`] for the [`PathItem`].
        #[serde(skip_serializing_if = "Option::is_none")]
        pub put: Option<Operation>,

        /// Post [`Operation`] for the [`PathItem`].
        #[serde(skip_serializing_if = "Option::is_none")]
        pub post: Option<Operation>,

        /// Delete [`Operation`] for the [`PathItem`].
        #[serde(skip_serializing_if = "Option::is_none")]
        pub delete: Option<Operation>,

        /// Options [`Operation`] for the [`PathItem`].
        #[serde(skip_serializing_if = "Option::is_none")]
        pub options: Option<Operation>,

        /// Head [`Operation`] for the [`PathItem`].
        #[serde(skip_serializing_if = "Option::is_none")]
        pub head: Option<Operation>,

        /// Patch [`Operation`] for the [`PathItem`].
        #[serde(skip_serializing_if = "Option::is_none")]
        pub patch: Option<Operation>,

        /// List of [`Parameter`]s common to all [`Operation`]s in this [`PathItem`].
        #[serde(skip_serializing_if = "Option::is_none")]
        pub parameters: Option<Vec<RefOr<Parameter>>>,

        /// Optional extensions "x-something".
        #[serde(skip_serializing_if = "Option::is_none", flatten)]
        pub extensions: Option<Extensions>,
    }
}

impl PathItem {
    /// Construct a new [`PathItem`] with provided [`Operation`] mapped to given [`HttpMethod`].
    pub fn new<O: Into<Operation>>(http_method: HttpMethod, operation: O) -> Self {
        let mut path_item = Self::default();
        path_item.set_operation(http_method, operation.into());

        path_item
    }

    /// Return the [`Operation`] declared for the given [`HttpMethod`].
    pub fn operation(&self, http_method: HttpMethod) -> Option<&Operation> {
        match http_method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
        }
    }

    /// Return mutable access to the [`Operation`] declared for the given [`HttpMethod`].
    pub fn operation_mut(&mut self, http_method: HttpMethod) -> Option<&mut Operation> {
        match http_method {
            HttpMethod::Get => self.get.as_mut(),
            HttpMethod::Put => self.put.as_mut(),
            HttpMethod::Post => self.post.as_mut(),
            HttpMethod::Delete => self.delete.as_mut(),
            HttpMethod::Options => self.options.as_mut(),
            HttpMethod::Head => self.head.as_mut(),
            HttpMethod::Patch => self.patch.as_mut(),
        }
    }

    fn set_operation(&mut self, http_method: HttpMethod, operation: Operation) {
        match http_method {
            HttpMethod::Get => self.get = Some(operation),
            HttpMethod::Put => self.put = Some(operation),
            HttpMethod::Post => self.post = Some(operation),
            HttpMethod::Delete => self.delete = Some(operation),
            HttpMethod::Options => self.options = Some(operation),
            HttpMethod::Head => self.head = Some(operation),
            HttpMethod::Patch => self.patch = Some(operation),
        };
    }

    /// Iterate mutably over every declared [`Operation`] of this [`PathItem`].
    pub fn operations_mut(&mut self) -> impl Iterator<Item = &mut Operation> {
        [
            self.get.as_mut(),
            self.put.as_mut(),
            self.post.as_mut(),
            self.delete.as_mut(),
            self.options.as_mut(),
            self.head.as_mut(),
            self.patch.as_mut(),
        ]
        .into_iter()
        .flatten()
    }
}

impl PathItemBuilder {
    /// Append a new [`Operation`] by [`HttpMethod`] to this [`PathItem`]. Operations can
    /// hold only one operation per [`HttpMethod`].
    pub fn operation<O: Into<Operation>>(mut self, http_method: HttpMethod, operation: O) -> Self {
        match http_method {
            HttpMethod::Get => self.get = Some(operation.into()),
            HttpMethod::Put => self.put = Some(operation.into()),
            HttpMethod::Post => self.post = Some(operation.into()),
            HttpMethod::Delete => self.delete = Some(operation.into()),
            HttpMethod::Options => self.options = Some(operation.into()),
            HttpMethod::Head => self.head = Some(operation.into()),
            HttpMethod::Patch => self.patch = Some(operation.into()),
        };

        self
    }

    /// Append list of [`Parameter`]s common to all [`Operation`]s to this [`PathItem`].
    pub fn parameters<I: IntoIterator<Item = P>, P: Into<RefOr<Parameter>>>(
        mut self,
        parameters: Option<I>,
    ) -> Self {
        set_value!(self parameters parameters.map(|parameters| parameters.into_iter().map(Into::into).collect()))
    }

    /// Add openapi extensions (x-something) to this [`PathItem`].
    pub fn extensions(mut self, extensions: Option<Extensions>) -> Self {
        set_value!(self extensions extensions)
    }
}

/// HTTP method of the operation.
///
/// List of supported HTTP methods <https://swagger.io/specification/v2/#path-item-object>
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// Type mapping for HTTP _GET_ request.
    Get,
    /// Type mapping for HTTP _PUT_ request.
    Put,
    /// Type mapping for HTTP _POST_ request.
    Post,
    /// Type mapping for HTTP _DELETE_ request.
    Delete,
    /// Type mapping for HTTP _OPTIONS_ request.
    Options,
    /// Type mapping for HTTP _HEAD_ request.
    Head,
    /// Type mapping for HTTP _PATCH_ request.
    Patch,
}

impl HttpMethod {
    /// Every method a [`PathItem`] can declare an [`Operation`] for.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
    ];

    /// Lowercase name as used for the path item key.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

builder! {
    OperationBuilder;

    /// Implements [Swagger Operation Object][operation] object.
    ///
    /// [operation]: https://swagger.io/specification/v2/#operation-object
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct Operation {
        /// List of tags used for grouping operations.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub tags: Option<Vec<String>>,

        /// Short summary what [`Operation`] does.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub summary: Option<String>,

        /// Long explanation of [`Operation`] behaviour. Markdown syntax is supported.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,

        /// Additional external documentation for this operation.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub external_docs: Option<ExternalDocs>,

        /// Identifier of the [`Operation`], unique among all operations of a document. Code
        /// generators typically derive handler names from it. Empty when not declared.
        #[serde(
            default,
            deserialize_with = "crate::swagger::null_as_default",
            skip_serializing_if = "String::is_empty"
        )]
        pub operation_id: String,

        /// MIME types the operation can consume.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub consumes: Option<Vec<String>>,

        /// MIME types the operation can produce.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub produces: Option<Vec<String>>,

        /// List of applicable parameters for this [`Operation`].
        #[serde(skip_serializing_if = "Option::is_none")]
        pub parameters: Option<Vec<RefOr<Parameter>>>,

        /// List of possible responses returned by the [`Operation`].
        #[serde(default, deserialize_with = "crate::swagger::null_as_default")]
        pub responses: Responses,

        /// Transfer protocols overriding the document level schemes.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub schemes: Option<Vec<Scheme>>,

        /// Define whether the operation is deprecated or not and thus should be avoided consuming.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub deprecated: Option<Deprecated>,

        /// Declaration which security mechanisms can be used for for the operation.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub security: Option<Vec<SecurityRequirement>>,

        /// Optional extensions "x-something".
        #[serde(skip_serializing_if = "Option::is_none", flatten)]
        pub extensions: Option<Extensions>,
    }
}

impl Operation {
    /// Construct a new API [`Operation`].
    pub fn new() -> Self {
        Default::default()
    }
}

impl OperationBuilder {
    /// Add or change tags of the [`Operation`].
    pub fn tags<I: IntoIterator<Item = V>, V: Into<String>>(mut self, tags: Option<I>) -> Self {
        set_value!(self tags tags.map(|tags| tags.into_iter().map(Into::into).collect()))
    }

    /// Add or change short summary of the [`Operation`].
    pub fn summary<S: Into<String>>(mut self, summary: Option<S>) -> Self {
        set_value!(self summary summary.map(|summary| summary.into()))
    }

    /// Add or change description of the [`Operation`].
    pub fn description<S: Into<String>>(mut self, description: Option<S>) -> Self {
        set_value!(self description description.map(|description| description.into()))
    }

    /// Add or change operation id of the [`Operation`].
    pub fn operation_id<S: Into<String>>(mut self, operation_id: S) -> Self {
        set_value!(self operation_id operation_id.into())
    }

    /// Append parameter to [`Operation`] parameters.
    pub fn parameter<P: Into<RefOr<Parameter>>>(mut self, parameter: P) -> Self {
        self.parameters
            .get_or_insert_with(Vec::new)
            .push(parameter.into());

        self
    }

    /// Add or change responses of the [`Operation`].
    pub fn responses<R: Into<Responses>>(mut self, responses: R) -> Self {
        set_value!(self responses responses.into())
    }

    /// Append status code and a [`Response`] to the [`Operation`] responses map.
    pub fn response<R: Into<Response>>(mut self, code: u16, response: R) -> Self {
        self.responses.status_codes.insert(code, response.into());

        self
    }

    /// Add or change the default [`Response`] of the [`Operation`].
    pub fn default_response<R: Into<Response>>(mut self, response: R) -> Self {
        self.responses.default = Some(response.into());

        self
    }

    /// Add or change deprecated status of the [`Operation`].
    pub fn deprecated(mut self, deprecated: Option<Deprecated>) -> Self {
        set_value!(self deprecated deprecated)
    }

    /// Add openapi extensions (x-something) of the [`Operation`].
    pub fn extensions(mut self, extensions: Option<Extensions>) -> Self {
        set_value!(self extensions extensions)
    }
}
