//! Rust implementation of the Swagger 2.0 document model.
//!
//! Only the parts of the document the mixer needs to look into are typed in depth. Schema
//! nodes, security schemes and examples are kept as opaque JSON so that whatever a document
//! carries there survives a load and save untouched.

use serde::{
    de::{Error, Expected, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::fmt::Formatter;

pub use self::{
    extensions::{Extensions, ExtensionsBuilder},
    info::{Contact, Info, InfoBuilder, License},
    parameter::{Parameter, ParameterBuilder, ParameterIn, SimpleType},
    path::{HttpMethod, Operation, OperationBuilder, PathItem, PathItemBuilder, Paths, PathsBuilder},
    response::{Header, Response, ResponseBuilder, Responses, ResponsesBuilder},
    schema::Schema,
};

pub mod extensions;
pub mod info;
pub mod parameter;
pub mod path;
pub mod response;
pub mod schema;

/// Map type used for every keyed collection of a [`Swagger`] document.
///
/// Keys are kept sorted so serialized output has a stable order. With the `preserve_order`
/// feature the map keeps document order instead.
#[cfg(not(feature = "preserve_order"))]
pub type DocMap<K, V> = std::collections::BTreeMap<K, V>;
#[cfg(feature = "preserve_order")]
#[allow(missing_docs)]
pub type DocMap<K, V> = indexmap::IndexMap<K, V>;

/// Map of security scheme names to the scopes required from each.
pub type SecurityRequirement = DocMap<String, Vec<String>>;

builder! {
    /// # Examples
    ///
    /// Create [`Swagger`] using [`SwaggerBuilder`].
    /// ```rust
    /// # use swagger_mixin::swagger::{Info, Paths, SwaggerBuilder};
    /// let swagger = SwaggerBuilder::new()
    ///      .info(Info::new("My api", "1.0.0"))
    ///      .paths(Paths::new())
    ///      .build();
    /// ```
    SwaggerBuilder;

    /// Root object of a Swagger 2.0 document.
    ///
    /// `definitions`, `parameters` and `responses` are the shared collections other parts of the
    /// document point into with `$ref`. Together with `paths` they are the collections a mixin
    /// contributes to a primary document.
    ///
    /// See more details at <https://swagger.io/specification/v2/#swagger-object>.
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct Swagger {
        /// Swagger specification version, always `2.0`.
        pub swagger: SwaggerVersion,

        /// Metadata about the API.
        pub info: Info,

        /// Host serving the API, optionally with a port.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub host: Option<String>,

        /// Base path relative to the host that all paths are served under.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub base_path: Option<String>,

        /// Transfer protocols of the API.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub schemes: Option<Vec<Scheme>>,

        /// MIME types the API can consume.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub consumes: Option<Vec<String>>,

        /// MIME types the API can produce.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub produces: Option<Vec<String>>,

        /// Available paths and operations of the API.
        #[serde(default, deserialize_with = "null_as_default")]
        pub paths: Paths,

        /// Data types produced and consumed by operations, by type name.
        #[serde(
            default,
            deserialize_with = "null_as_default",
            skip_serializing_if = "DocMap::is_empty"
        )]
        pub definitions: DocMap<String, Schema>,

        /// Parameters shared across operations, by name.
        #[serde(
            default,
            deserialize_with = "null_as_default",
            skip_serializing_if = "DocMap::is_empty"
        )]
        pub parameters: DocMap<String, Parameter>,

        /// Responses shared across operations, by name.
        #[serde(
            default,
            deserialize_with = "null_as_default",
            skip_serializing_if = "DocMap::is_empty"
        )]
        pub responses: DocMap<String, Response>,

        /// Security schemes available to the API, kept as opaque nodes.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub security_definitions: Option<DocMap<String, serde_json::Value>>,

        /// Security requirements applied to the whole API.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub security: Option<Vec<SecurityRequirement>>,

        /// Tags with additional documentation for operation tags.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub tags: Option<Vec<Tag>>,

        /// Additional external documentation.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub external_docs: Option<ExternalDocs>,

        /// Optional extensions "x-something".
        #[serde(skip_serializing_if = "Option::is_none", flatten)]
        pub extensions: Option<Extensions>,
    }
}

impl Swagger {
    /// Construct a new [`Swagger`] document from [`Info`] and [`Paths`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use swagger_mixin::swagger::{Info, Paths, Swagger};
    /// let swagger = Swagger::new(Info::new("pet api", "0.1.0"), Paths::new());
    /// ```
    pub fn new<P: Into<Paths>>(info: Info, paths: P) -> Self {
        Self {
            info,
            paths: paths.into(),
            ..Default::default()
        }
    }

    /// Converts this [`Swagger`] to JSON String. This method essentially calls [`serde_json::to_string`] method.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Converts this [`Swagger`] to pretty JSON String indented with two spaces.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

}

impl SwaggerBuilder {
    /// Add [`Info`] metadata of the API.
    pub fn info<I: Into<Info>>(mut self, info: I) -> Self {
        set_value!(self info info.into())
    }

    /// Add or change the host serving the API.
    pub fn host<S: Into<String>>(mut self, host: Option<S>) -> Self {
        set_value!(self host host.map(|host| host.into()))
    }

    /// Add or change the base path of the API.
    pub fn base_path<S: Into<String>>(mut self, base_path: Option<S>) -> Self {
        set_value!(self base_path base_path.map(|base_path| base_path.into()))
    }

    /// Add [`Paths`] to configure operations and endpoints of the API.
    pub fn paths<P: Into<Paths>>(mut self, paths: P) -> Self {
        set_value!(self paths paths.into())
    }

    /// Add a named type definition.
    pub fn definition<S: Into<String>, I: Into<Schema>>(mut self, name: S, schema: I) -> Self {
        self.definitions.insert(name.into(), schema.into());

        self
    }

    /// Add a shared [`Parameter`] under `name`.
    pub fn parameter<S: Into<String>, P: Into<Parameter>>(mut self, name: S, parameter: P) -> Self {
        self.parameters.insert(name.into(), parameter.into());

        self
    }

    /// Add a shared [`Response`] under `name`.
    pub fn response<S: Into<String>, R: Into<Response>>(mut self, name: S, response: R) -> Self {
        self.responses.insert(name.into(), response.into());

        self
    }

    /// Add iterator of [`Tag`]s to add additional documentation for **operations** tags.
    pub fn tags<I: IntoIterator<Item = Tag>>(mut self, tags: Option<I>) -> Self {
        set_value!(self tags tags.map(|tags| tags.into_iter().collect()))
    }

    /// Add openapi extensions (x-something) to the document root.
    pub fn extensions(mut self, extensions: Option<Extensions>) -> Self {
        set_value!(self extensions extensions)
    }
}

/// Deserialize a `null` value, e.g. a YAML key written without a value, as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Represents the only supported [Swagger version][version].
///
/// Deserialization accepts the string `"2.0"` and, since YAML documents frequently leave it
/// unquoted, the number `2.0` as well.
///
/// [version]: <https://swagger.io/specification/v2/#swagger-object>
#[derive(Serialize, Clone, PartialEq, Eq, Default, Debug)]
pub enum SwaggerVersion {
    /// Will serialize to `2.0`.
    #[serde(rename = "2.0")]
    #[default]
    Version2,
}

impl<'de> Deserialize<'de> for SwaggerVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct VersionVisitor;

        impl<'v> Visitor<'v> for VersionVisitor {
            type Value = SwaggerVersion;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                formatter.write_str("swagger version 2.0")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                if v == "2.0" {
                    Ok(SwaggerVersion::Version2)
                } else {
                    let expected: &dyn Expected = &"2.0";
                    Err(Error::invalid_value(serde::de::Unexpected::Str(v), expected))
                }
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: Error,
            {
                if v == 2.0 {
                    Ok(SwaggerVersion::Version2)
                } else {
                    let expected: &dyn Expected = &"2.0";
                    Err(Error::invalid_value(serde::de::Unexpected::Float(v), expected))
                }
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: Error,
            {
                let expected: &dyn Expected = &"2.0";
                Err(Error::invalid_value(serde::de::Unexpected::Unsigned(v), expected))
            }
        }

        deserializer.deserialize_any(VersionVisitor)
    }
}

/// Transfer protocol of the API.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Scheme {
    Http,
    Https,
    Ws,
    Wss,
}

builder! {
    TagBuilder;

    /// Implements [Swagger Tag Object][tag].
    ///
    /// [tag]: https://swagger.io/specification/v2/#tag-object
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct Tag {
        /// Name of the tag.
        pub name: String,

        /// Short description of the tag.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,

        /// Additional external documentation for the tag.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub external_docs: Option<ExternalDocs>,

        /// Optional extensions "x-something".
        #[serde(skip_serializing_if = "Option::is_none", flatten)]
        pub extensions: Option<Extensions>,
    }
}

impl Tag {
    /// Construct a new [`Tag`] with given name.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl TagBuilder {
    /// Add name of the [`Tag`].
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        set_value!(self name name.into())
    }

    /// Add or change the description of the [`Tag`].
    pub fn description<S: Into<String>>(mut self, description: Option<S>) -> Self {
        set_value!(self description description.map(|description| description.into()))
    }
}

builder! {
    ExternalDocsBuilder;

    /// Reference to external resource allowing extended documentation.
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct ExternalDocs {
        /// Target url for external documentation location.
        pub url: String,

        /// Additional description supporting markdown syntax of the external documentation.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
    }
}

impl ExternalDocs {
    /// Construct a new [`ExternalDocs`] with given url.
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// A [`Ref`] or some other type `T`.
///
/// Used for operation and path item parameters, which may be inline or point at the shared
/// `parameters` of the document.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// Represents [`Ref`] reference to another object in the document. e.g.
    /// `$ref: #/parameters/limit`
    Ref(Ref),
    /// Represents an inline value.
    T(T),
}

impl<T> From<T> for RefOr<T> {
    fn from(value: T) -> Self {
        Self::T(value)
    }
}

/// Reference to another object of the document.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Default, Debug)]
pub struct Ref {
    /// Reference location of the actual object.
    #[serde(rename = "$ref")]
    pub ref_location: String,
}

impl Ref {
    /// Construct a new [`Ref`] with custom ref location.
    pub fn new<I: Into<String>>(ref_location: I) -> Self {
        Self {
            ref_location: ref_location.into(),
        }
    }

    /// Construct a new [`Ref`] pointing at a shared parameter of the document.
    pub fn from_parameter_name<I: Into<String>>(parameter_name: I) -> Self {
        Self::new(format!("#/parameters/{}", parameter_name.into()))
    }
}

impl From<Ref> for RefOr<Parameter> {
    fn from(value: Ref) -> Self {
        Self::Ref(value)
    }
}

/// Value used to indicate whether an operation is deprecated.
///
/// The value will serialize to boolean.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[allow(missing_docs)]
pub enum Deprecated {
    True,
    #[default]
    False,
}

impl Serialize for Deprecated {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bool(matches!(self, Self::True))
    }
}

impl<'de> Deserialize<'de> for Deprecated {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct BoolVisitor;
        impl<'de> Visitor<'de> for BoolVisitor {
            type Value = Deprecated;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a bool true or false")
            }

            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                match v {
                    true => Ok(Deprecated::True),
                    false => Ok(Deprecated::False),
                }
            }
        }
        deserializer.deserialize_bool(BoolVisitor)
    }
}

macro_rules! build_fn {
    ( $vis:vis $name:ident $( $field:ident ),+ ) => {
        #[doc = concat!("Constructs a new [`", stringify!($name),"`] taking all fields values from this object.")]
        $vis fn build(self) -> $name {
            $name {
                $(
                    $field: self.$field,
                )*
            }
        }
    };
}
pub(crate) use build_fn;

macro_rules! set_value {
    ( $self:ident $field:ident $value:expr ) => {{
        $self.$field = $value;

        $self
    }};
}
pub(crate) use set_value;

macro_rules! new {
    ( $vis:vis $name:ident ) => {
        #[doc = concat!("Constructs a new [`", stringify!($name),"`].")]
        $vis fn new() -> $name {
            $name {
                ..Default::default()
            }
        }
    };
}
pub(crate) use new;

macro_rules! from {
    ( $name:ident $to:ident $( $field:ident ),+ ) => {
        impl From<$name> for $to {
            fn from(value: $name) -> Self {
                Self {
                    $( $field: value.$field, )*
                }
            }
        }

        impl From<$to> for $name {
            fn from(value: $to) -> Self {
                value.build()
            }
        }
    };
}
pub(crate) use from;

macro_rules! builder {
    ( $( #[$builder_meta:meta] )* $builder_name:ident; $(#[$meta:meta])* $vis:vis $key:ident $name:ident $( $tt:tt )* ) => {
        builder!( @type_impl $builder_name $( #[$meta] )* $vis $key $name $( $tt )* );
        builder!( @builder_impl $( #[$builder_meta] )* $builder_name $( #[$meta] )* $vis $key $name $( $tt )* );
    };

    ( @type_impl $builder_name:ident $( #[$meta:meta] )* $vis:vis $key:ident $name:ident
        { $( $( #[$field_meta:meta] )* $field_vis:vis $field:ident: $field_ty:ty, )* }
    ) => {
        $( #[$meta] )*
        $vis $key $name {
            $( $( #[$field_meta] )* $field_vis $field: $field_ty, )*
        }

        impl $name {
            #[doc = concat!("Construct a new ", stringify!($builder_name), ".")]
            #[doc = ""]
            #[doc = concat!("This is effectively same as calling [`", stringify!($builder_name), "::new`]")]
            $vis fn builder() -> $builder_name {
                $builder_name::new()
            }
        }
    };

    ( @builder_impl $( #[$builder_meta:meta] )* $builder_name:ident $( #[$meta:meta] )* $vis:vis $key:ident $name:ident
        { $( $( #[$field_meta:meta] )* $field_vis:vis $field:ident: $field_ty:ty, )* }
    ) => {
        #[doc = concat!("Builder for [`", stringify!($name),
            "`] with chainable configuration methods to create a new [`", stringify!($name) , "`].")]
        $( #[$builder_meta] )*
        #[derive(Debug)]
        $vis $key $builder_name {
            $( $field: $field_ty, )*
        }

        impl Default for $builder_name {
            fn default() -> Self {
                let meta_default: $name = $name::default();
                Self {
                    $( $field: meta_default.$field, )*
                }
            }
        }

        impl $builder_name {
            crate::swagger::new!($vis $builder_name);
            crate::swagger::build_fn!($vis $name $( $field ),* );
        }

        crate::swagger::from!($name $builder_name $( $field ),* );
    };
}
pub(crate) use builder;
