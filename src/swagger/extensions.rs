//! Implements [Swagger vendor extensions][extensions].
//!
//! [extensions]: https://swagger.io/specification/v2/#vendor-extensions
use std::ops::{Deref, DerefMut};

use serde::Serialize;

use super::{builder, DocMap};

pub(crate) const EXTENSION_PREFIX: &str = "x-";

builder! {
    ExtensionsBuilder;

    /// Additional [data for extending][extensions] the Swagger specification.
    ///
    /// Only keys starting with `x-` are picked up when deserializing.
    ///
    /// [extensions]: https://swagger.io/specification/v2/#vendor-extensions
    #[derive(Default, Serialize, Clone, PartialEq, Debug)]
    pub struct Extensions {
        #[serde(flatten)]
        extensions: DocMap<String, serde_json::Value>,
    }
}

impl Deref for Extensions {
    type Target = DocMap<String, serde_json::Value>;

    fn deref(&self) -> &Self::Target {
        &self.extensions
    }
}

impl DerefMut for Extensions {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.extensions
    }
}

impl<K, V> FromIterator<(K, V)> for Extensions
where
    K: Into<String>,
    V: Into<serde_json::Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let extensions = iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { extensions }
    }
}

impl<'de> serde::de::Deserialize<'de> for Extensions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let extensions: DocMap<String, serde_json::Value> = DocMap::deserialize(deserializer)?;
        let extensions = extensions
            .into_iter()
            .filter(|(k, _)| k.starts_with(EXTENSION_PREFIX))
            .collect();
        Ok(Self { extensions })
    }
}

impl ExtensionsBuilder {
    /// Adds a key-value pair to the extensions. Extensions keys are prefixed with `"x-"` if
    /// not done already.
    pub fn add<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        let mut key: String = key.into();
        if !key.starts_with(EXTENSION_PREFIX) {
            key = format!("{EXTENSION_PREFIX}{key}");
        }
        self.extensions.insert(key, value.into());
        self
    }
}
