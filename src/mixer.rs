//! Merges mixin [`Swagger`] documents into a primary document.
//!
//! Typical use is adding independently versioned APIs, e.g. a metadata API, to an application
//! API of the same service so that server code generators that only accept one document per
//! process can be fed a single merged document.
//!
//! Entries of `paths`, `definitions`, `parameters` and `responses` are added to the primary in
//! the order of the given mixins. An entry whose key already exists in the primary, or was
//! added by a mixin earlier in the list, is skipped and reported as a [`Collision`]. Nothing in
//! the primary is ever overwritten. Keys are compared as they are, no normalization of case or
//! trailing slashes takes place.
//!
//! Definitions with the same name are assumed to describe the same type. Make sure that holds
//! for your documents before accepting definition collisions.
use std::fmt::{self, Display};

use crate::swagger::{DocMap, HttpMethod, Swagger};

pub use self::{
    descriptions::{
        fix_empty_description, fix_empty_descriptions, fix_empty_response_descriptions,
        EMPTY_DESCRIPTION,
    },
    operation_ids::OperationIds,
};

pub mod descriptions;
pub mod operation_ids;

/// Top level collection of a document that mixins contribute to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Definitions,
    Paths,
    Parameters,
    Responses,
}

impl Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Definitions => "definitions",
            Collection::Paths => "paths",
            Collection::Parameters => "top level parameters",
            Collection::Responses => "top level responses",
        };
        f.write_str(name)
    }
}

/// Mixin entry skipped because its key was already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// Zero based position of the mixin that supplied the entry.
    pub mixin: usize,
    pub collection: Collection,
    pub key: String,
}

impl Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entry '{}' already exists in primary or higher priority mixin, skipping",
            self.collection, self.key
        )
    }
}

/// Operation whose `operationId` was suffixed to keep identifiers unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedOperation {
    /// Zero based position of the mixin that supplied the operation.
    pub mixin: usize,
    pub path: String,
    pub method: HttpMethod,
    pub from: String,
    pub to: String,
}

/// Outcome of [`mixin_with_report`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MixinReport {
    /// Skipped entries in the order they were encountered.
    pub collisions: Vec<Collision>,
    /// Renamed operation identifiers in the order they were encountered.
    pub renamed_operations: Vec<RenamedOperation>,
}

impl MixinReport {
    /// Number of entries skipped over all collections and mixins.
    pub fn collision_count(&self) -> usize {
        self.collisions.len()
    }

    /// Collisions of a single collection.
    pub fn collisions_in(&self, collection: Collection) -> impl Iterator<Item = &Collision> {
        self.collisions
            .iter()
            .filter(move |collision| collision.collection == collection)
    }
}

/// Add the `paths`, `definitions`, `parameters` and `responses` of `mixins` to `primary` and
/// return the number of entries skipped because their key already existed.
///
/// Compare the returned count to the number you expect so that new collisions get noticed, and
/// review collisions carefully before accepting them.
///
/// Operation identifiers of added paths that collide with one already present get `Mixin<N>`
/// appended, `N` being the zero based position of the mixin. No other part of the primary is
/// modified. Consider running [`fix_empty_response_descriptions`] on the result when the
/// documents were read from storage, see [`descriptions`].
pub fn mixin(primary: &mut Swagger, mixins: &[Swagger]) -> usize {
    mixin_with_report(primary, mixins).collision_count()
}

/// Same as [`mixin`] but returns every [`Collision`] and [`RenamedOperation`].
pub fn mixin_with_report(primary: &mut Swagger, mixins: &[Swagger]) -> MixinReport {
    let mut report = MixinReport::default();
    let mut operation_ids = OperationIds::collect(primary);

    for (index, mixin) in mixins.iter().enumerate() {
        mixin_entries(
            &mut primary.definitions,
            &mixin.definitions,
            index,
            Collection::Definitions,
            &mut report,
            |_, _, _| {},
        );

        mixin_entries(
            &mut primary.paths.paths,
            &mixin.paths.paths,
            index,
            Collection::Paths,
            &mut report,
            |path, item, report| {
                for (method, from, to) in operation_ids.disambiguate_path_item(item, index) {
                    tracing::debug!(mixin = index, path, %method, "renamed operationId '{from}' to '{to}'");
                    report.renamed_operations.push(RenamedOperation {
                        mixin: index,
                        path: path.to_string(),
                        method,
                        from,
                        to,
                    });
                }
            },
        );

        // renaming would mean rewriting every $ref to the entry, skip instead
        mixin_entries(
            &mut primary.parameters,
            &mixin.parameters,
            index,
            Collection::Parameters,
            &mut report,
            |_, _, _| {},
        );
        mixin_entries(
            &mut primary.responses,
            &mixin.responses,
            index,
            Collection::Responses,
            &mut report,
            |_, _, _| {},
        );
    }

    report
}

fn mixin_entries<V, F>(
    primary: &mut DocMap<String, V>,
    mixin: &DocMap<String, V>,
    mixin_index: usize,
    collection: Collection,
    report: &mut MixinReport,
    mut prepare: F,
) where
    V: Clone,
    F: FnMut(&str, &mut V, &mut MixinReport),
{
    for (key, value) in mixin {
        if primary.contains_key(key) {
            let collision = Collision {
                mixin: mixin_index,
                collection,
                key: key.clone(),
            };
            tracing::warn!(mixin = mixin_index, "{collision}");
            report.collisions.push(collision);
            continue;
        }

        let mut value = value.clone();
        prepare(key, &mut value, report);
        primary.insert(key.clone(), value);
    }
}
