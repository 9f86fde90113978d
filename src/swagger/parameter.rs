//! Implements [Swagger Parameter Object][parameter].
//!
//! [parameter]: https://swagger.io/specification/v2/#parameter-object
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::{builder, extensions::Extensions, set_value, Schema};

builder! {
    ParameterBuilder;

    /// Single operation parameter, or a shared one under the document `parameters`.
    ///
    /// Body parameters carry a [`Schema`], every other location describes its value with the
    /// keywords of [`SimpleType`].
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct Parameter {
        /// Name of the parameter. Case sensitive.
        pub name: String,

        /// Parameter location.
        #[serde(rename = "in")]
        pub parameter_in: ParameterIn,

        /// Markdown supported description of the parameter.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,

        /// Declares whether the parameter is mandatory. Path parameters always are.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub required: Option<bool>,

        /// Schema of a [`ParameterIn::Body`] parameter.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub schema: Option<Schema>,

        /// Allows sending a parameter with an empty value, query and form parameters only.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub allow_empty_value: Option<bool>,

        /// Type of non body parameters.
        #[serde(flatten)]
        pub simple_type: SimpleType,

        /// Optional extensions "x-something".
        #[serde(skip_serializing_if = "Option::is_none", flatten)]
        pub extensions: Option<Extensions>,
    }
}

impl Parameter {
    /// Constructs a new [`Parameter`] with given name and location. Path parameters are
    /// marked required.
    pub fn new<S: Into<String>>(name: S, parameter_in: ParameterIn) -> Self {
        Self {
            name: name.into(),
            required: (parameter_in == ParameterIn::Path).then_some(true),
            parameter_in,
            ..Default::default()
        }
    }
}

impl ParameterBuilder {
    /// Add name of the [`Parameter`].
    pub fn name<I: Into<String>>(mut self, name: I) -> Self {
        set_value!(self name name.into())
    }

    /// Add in of the [`Parameter`].
    pub fn parameter_in(mut self, parameter_in: ParameterIn) -> Self {
        set_value!(self parameter_in parameter_in)
    }

    /// Add or change description of the [`Parameter`].
    pub fn description<S: Into<String>>(mut self, description: Option<S>) -> Self {
        set_value!(self description description.map(|description| description.into()))
    }

    /// Add required declaration of the [`Parameter`].
    pub fn required(mut self, required: Option<bool>) -> Self {
        set_value!(self required required)
    }

    /// Add or change the body [`Schema`] of the [`Parameter`].
    pub fn schema<I: Into<Schema>>(mut self, schema: Option<I>) -> Self {
        set_value!(self schema schema.map(|schema| schema.into()))
    }

    /// Add or change the `type` of a non body [`Parameter`].
    pub fn parameter_type<S: Into<String>>(mut self, parameter_type: Option<S>) -> Self {
        self.simple_type.simple_type = parameter_type.map(|parameter_type| parameter_type.into());

        self
    }
}

/// Location of a [`Parameter`].
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub enum ParameterIn {
    /// Parameter appended to the url.
    #[default]
    Query,
    /// Custom header expected as part of the request.
    Header,
    /// Part of the path template, e.g. `{id}` of `/widgets/{id}`.
    Path,
    /// Form field of an `application/x-www-form-urlencoded` or `multipart/form-data` request.
    FormData,
    /// Request payload.
    Body,
}

/// Type keywords shared by non body parameters, headers and array items.
#[non_exhaustive]
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SimpleType {
    /// `string`, `number`, `integer`, `boolean`, `array` or `file`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub simple_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Item type of an `array`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<Number>,
}

#[cfg(test)]
mod tests {
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn path_parameter_is_required() {
        let parameter = Parameter::new("id", ParameterIn::Path);

        assert_eq!(parameter.required, Some(true));
        assert_eq!(Parameter::new("limit", ParameterIn::Query).required, None);
    }

    #[test]
    fn deserialize_form_data_parameter_with_validations() -> Result<(), serde_json::Error> {
        let value = json!({
            "name": "tags",
            "in": "formData",
            "type": "array",
            "items": { "type": "string" },
            "collectionFormat": "multi",
            "maxItems": 5,
            "enum": ["a", "b"],
            "x-order": 1
        });

        let parameter: Parameter = serde_json::from_value(value.clone())?;

        assert_eq!(parameter.parameter_in, ParameterIn::FormData);
        assert_eq!(parameter.simple_type.simple_type.as_deref(), Some("array"));
        assert_eq!(parameter.simple_type.max_items, Some(5));
        assert_json_eq!(parameter, value);

        Ok(())
    }

    #[test]
    fn serialize_body_parameter() {
        let parameter = Parameter::builder()
            .name("widget")
            .parameter_in(ParameterIn::Body)
            .required(Some(true))
            .schema(Some(Schema::from_definition_name("Widget")))
            .build();

        assert_json_eq!(
            parameter,
            json!({
                "name": "widget",
                "in": "body",
                "required": true,
                "schema": { "$ref": "#/definitions/Widget" }
            })
        );
    }
}
