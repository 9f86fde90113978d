#![warn(rustdoc::broken_intra_doc_links)]
//! Merge Swagger 2.0 documents into a single primary document.
//!
//! Server code generators usually accept a single API description per process. Services that
//! expose more than one independently versioned API, e.g. an application API and a metadata
//! API, can use this crate to fold the additional _mixin_ documents into the _primary_
//! document before code generation.
//!
//! Merging is additive only. Entries of `paths`, `definitions`, `parameters` and `responses`
//! are copied from the mixins to the primary unless their key is already taken, in which case
//! the entry is skipped and counted as a collision. Colliding operation identifiers of added
//! paths are made unique. See [`mixer`] for the details.
//!
//! # Crate Features
//!
//! * **`preserve_order`** Keep maps of the document model in insertion order instead of
//!   sorting them by key. Merged entries are then appended after the entries of the primary.
//!
//! # Examples
//!
//! Merge documents in memory.
//! ```rust
//! use swagger_mixin::{
//!     mixer,
//!     swagger::{HttpMethod, Info, OperationBuilder, PathItem, PathsBuilder, Response, Swagger},
//! };
//!
//! let mut primary = Swagger::new(
//!     Info::new("widgets", "1.0.0"),
//!     PathsBuilder::new().path(
//!         "/widgets",
//!         PathItem::new(
//!             HttpMethod::Get,
//!             OperationBuilder::new()
//!                 .operation_id("listWidgets")
//!                 .response(200, Response::new("widgets")),
//!         ),
//!     ),
//! );
//! let metadata = Swagger::new(
//!     Info::new("metadata", "1.0.0"),
//!     PathsBuilder::new().path(
//!         "/health",
//!         PathItem::new(
//!             HttpMethod::Get,
//!             OperationBuilder::new()
//!                 .operation_id("health")
//!                 .response(200, Response::new("healthy")),
//!         ),
//!     ),
//! );
//!
//! let collisions = mixer::mixin(&mut primary, &[metadata]);
//!
//! assert_eq!(collisions, 0);
//! assert!(primary.paths.get_path_item("/health").is_some());
//! ```
//!
//! Merge files and write the result to stdout, which is what the `swagger-mixin` binary does.
//! ```rust,no_run
//! let collisions = swagger_mixin::loader::mixin_files(
//!     "api.yaml",
//!     &["metadata.yaml"],
//!     std::io::stdout().lock(),
//! )?;
//! # Ok::<(), swagger_mixin::error::Error>(())
//! ```

pub mod error;
pub mod loader;
pub mod mixer;
pub mod swagger;

pub use self::{
    error::{Error, ErrorKind, Result},
    loader::{load, mixin_files, Format},
    mixer::{mixin, mixin_with_report, MixinReport},
    swagger::Swagger,
};
