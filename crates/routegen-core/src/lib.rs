//! Routegen core — typed gateway route declarations resolved into a
//! flat list of downstream route descriptors.
//!
//! This crate provides:
//! - [`GatewayRoutes`], [`RouteGroupSpec`], [`RouteSpec`] — the traits a
//!   gateway declaration implements, plus the shipped [`Route`] and
//!   [`RouteGroup`] types for the common case.
//! - [`Schema`] / [`TargetSchema`] — declarative per-type field tables,
//!   the compile-time replacement for reflective field discovery.
//! - [`MergeTable`] — the memoized route/group-to-target field
//!   correspondence, built once per schema triple.
//! - [`default_mapper`] — copy-with-precedence merging (route wins over
//!   group, group over target default) plus the derived upstream path
//!   and timeout fields.
//! - [`build_routes`] — the walker that turns a whole gateway
//!   declaration into the ordered descriptor list.
//! - [`MapOptions`] — the single override point: a caller-supplied
//!   mapper replacing [`default_mapper`].

pub mod descriptor;
pub mod error;
pub mod merge;
pub mod model;
pub mod options;
pub mod resolve;
pub mod schema;

// Re-exports for convenience.
pub use descriptor::{HostAndPort, QosOptions, RouteDescriptor};
pub use error::SchemaError;
pub use merge::{default_mapper, merge_table_for, MergeEntry, MergeTable, SPECIAL_FIELDS};
pub use model::{GatewayRoutes, Route, RouteGroup, RouteGroupSpec, RouteSpec};
pub use options::{MapOptions, RouteMapperFn};
pub use resolve::build_routes;
pub use schema::{
    match_field, validate_schema, FieldDescriptor, FieldKind, FieldValue, Schema, TargetSchema,
};
