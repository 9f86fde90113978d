//! Keeps operation identifiers unique while paths of mixins are added to a primary.
use std::collections::HashSet;

use crate::swagger::{HttpMethod, Operation, PathItem, Swagger};

/// Methods whose operations take part in identifier collision handling. `options` is left
/// out, its operations are neither collected nor renamed.
const SCANNED_METHODS: [HttpMethod; 6] = [
    HttpMethod::Get,
    HttpMethod::Put,
    HttpMethod::Post,
    HttpMethod::Delete,
    HttpMethod::Head,
    HttpMethod::Patch,
];

const MIXIN_SUFFIX: &str = "Mixin";

/// Registry of operation identifiers seen so far during a merge.
///
/// The registry starts out with the identifiers of the primary and is shared by every mixin of
/// the merge, so an identifier brought in by one mixin is still known to the next. Empty
/// identifiers are never registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationIds {
    seen: HashSet<String>,
}

impl OperationIds {
    /// Collect the non empty identifiers of every path operation of `swagger`.
    pub fn collect(swagger: &Swagger) -> Self {
        let seen = swagger
            .paths
            .paths
            .values()
            .flat_map(|item| {
                SCANNED_METHODS
                    .into_iter()
                    .filter_map(move |method| item.operation(method))
            })
            .map(|operation| operation.operation_id.as_str())
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect();

        Self { seen }
    }

    pub fn contains(&self, operation_id: &str) -> bool {
        self.seen.contains(operation_id)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Rename the identifier of `operation` to `<id>Mixin<mixin_index>` if it is already
    /// registered, then register the resulting identifier.
    ///
    /// Returns the original identifier when the operation was renamed. There is no second
    /// round, a renamed identifier that happens to collide again is kept as is.
    pub fn disambiguate(&mut self, operation: &mut Operation, mixin_index: usize) -> Option<String> {
        if operation.operation_id.is_empty() {
            return None;
        }

        let mut renamed_from = None;
        if self.seen.contains(&operation.operation_id) {
            let renamed = format!("{}{MIXIN_SUFFIX}{mixin_index}", operation.operation_id);
            renamed_from = Some(std::mem::replace(&mut operation.operation_id, renamed));
        }
        self.seen.insert(operation.operation_id.clone());

        renamed_from
    }

    /// Run [`OperationIds::disambiguate`] over the operations of `item`, returning method,
    /// original and new identifier of every renamed operation.
    pub fn disambiguate_path_item(
        &mut self,
        item: &mut PathItem,
        mixin_index: usize,
    ) -> Vec<(HttpMethod, String, String)> {
        let mut renamed = Vec::new();
        for method in SCANNED_METHODS {
            let Some(operation) = item.operation_mut(method) else {
                continue;
            };
            if let Some(from) = self.disambiguate(operation, mixin_index) {
                renamed.push((method, from, operation.operation_id.clone()));
            }
        }

        renamed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swagger::{Info, OperationBuilder, PathItemBuilder, Paths, PathsBuilder};

    fn operation(operation_id: &str) -> Operation {
        OperationBuilder::new().operation_id(operation_id).build()
    }

    fn swagger(paths: Paths) -> Swagger {
        Swagger::new(Info::new("api", "1"), paths)
    }

    #[test]
    fn collect_skips_empty_identifiers() {
        let ids = OperationIds::collect(&swagger(
            PathsBuilder::new()
                .path(
                    "/widgets",
                    PathItemBuilder::new()
                        .operation(HttpMethod::Get, operation("listWidgets"))
                        .operation(HttpMethod::Post, operation(""))
                        .operation(HttpMethod::Patch, operation("patchWidgets"))
                        .build(),
                )
                .build(),
        ));

        assert_eq!(ids.len(), 2);
        assert!(ids.contains("listWidgets"));
        assert!(ids.contains("patchWidgets"));
        assert!(!ids.contains(""));
    }

    #[test]
    fn collect_ignores_options_operations() {
        let ids = OperationIds::collect(&swagger(
            PathsBuilder::new()
                .path(
                    "/widgets",
                    PathItemBuilder::new()
                        .operation(HttpMethod::Options, operation("widgetOptions"))
                        .build(),
                )
                .build(),
        ));

        assert!(ids.is_empty());
    }

    #[test]
    fn disambiguate_renames_only_known_identifiers() {
        let mut ids = OperationIds::default();

        let mut first = operation("getWidget");
        assert_eq!(ids.disambiguate(&mut first, 0), None);
        assert_eq!(first.operation_id, "getWidget");

        let mut second = operation("getWidget");
        assert_eq!(ids.disambiguate(&mut second, 3), Some("getWidget".to_string()));
        assert_eq!(second.operation_id, "getWidgetMixin3");
        assert!(ids.contains("getWidgetMixin3"));
    }

    #[test]
    fn disambiguate_leaves_empty_identifiers() {
        let mut ids = OperationIds::default();

        let mut first = operation("");
        let mut second = operation("");
        assert_eq!(ids.disambiguate(&mut first, 0), None);
        assert_eq!(ids.disambiguate(&mut second, 0), None);

        assert_eq!(second.operation_id, "");
        assert!(ids.is_empty());
    }

    #[test]
    fn disambiguate_does_not_retry_renamed_identifier() {
        let mut ids = OperationIds::default();
        for id in ["getWidget", "getWidgetMixin1"] {
            ids.disambiguate(&mut operation(id), 0);
        }

        let mut colliding = operation("getWidget");
        ids.disambiguate(&mut colliding, 1);

        assert_eq!(colliding.operation_id, "getWidgetMixin1");
    }

    #[test]
    fn disambiguate_path_item_leaves_options_alone() {
        let mut ids = OperationIds::default();
        ids.disambiguate(&mut operation("shared"), 0);

        let mut item = PathItemBuilder::new()
            .operation(HttpMethod::Get, operation("shared"))
            .operation(HttpMethod::Options, operation("shared"))
            .build();

        let renamed = ids.disambiguate_path_item(&mut item, 2);

        assert_eq!(
            renamed,
            vec![(HttpMethod::Get, "shared".to_string(), "sharedMixin2".to_string())]
        );
        assert_eq!(
            item.options.as_ref().map(|o| o.operation_id.as_str()),
            Some("shared")
        );
    }

    #[test]
    fn options_identifier_of_primary_does_not_cause_rename() {
        let primary = swagger(
            PathsBuilder::new()
                .path(
                    "/widgets",
                    PathItemBuilder::new()
                        .operation(HttpMethod::Options, operation("describeWidgets"))
                        .build(),
                )
                .build(),
        );
        let mut ids = OperationIds::collect(&primary);

        let mut mixin_operation = operation("describeWidgets");
        ids.disambiguate(&mut mixin_operation, 0);

        assert_eq!(mixin_operation.operation_id, "describeWidgets");
    }
}
