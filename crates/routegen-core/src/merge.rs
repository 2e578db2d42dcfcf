use std::any::TypeId;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use tracing::debug;

use crate::descriptor::RouteDescriptor;
use crate::model::{RouteGroupSpec, RouteSpec};
use crate::schema::{match_field, FieldDescriptor, Schema, TargetSchema};

/// Fields excluded from generic copy-merge. They are either derived
/// (path concatenation, timeout conversion) or structural (the route
/// list, the host/port binding) and are handled explicitly.
pub const SPECIAL_FIELDS: &[&str] = &[
    "timeout",
    "upstream_path_template",
    "routes",
    "host",
    "port",
];

/// One row of the merge table: a target field plus the route field
/// and/or group field it is populated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeEntry {
    pub target: FieldDescriptor,
    pub route: Option<&'static str>,
    pub group: Option<&'static str>,
}

/// The cached correspondence between source (route/group) fields and
/// target fields for one schema triple.
///
/// Row order is route-declared fields first, then group-only fields in
/// group declaration order. Assignment is commutative so the order has
/// no visible effect, but it is deterministic.
#[derive(Debug, Clone, Default)]
pub struct MergeTable {
    entries: Vec<MergeEntry>,
}

impl MergeTable {
    /// Build the table for one (target, route, group) schema triple.
    pub fn build<T: TargetSchema, R: Schema, G: Schema>() -> Self {
        let targets = T::fields();
        let mut entries: Vec<MergeEntry> = Vec::new();

        for field in R::fields() {
            if SPECIAL_FIELDS.contains(&field.name) {
                continue;
            }
            if let Some(target) = match_field(targets, field) {
                entries.push(MergeEntry {
                    target,
                    route: Some(field.name),
                    group: None,
                });
            }
        }

        for field in G::fields() {
            if SPECIAL_FIELDS.contains(&field.name) {
                continue;
            }
            if let Some(entry) = entries.iter_mut().find(|e| e.target.matches(field)) {
                entry.group = Some(field.name);
            } else if let Some(target) = match_field(targets, field) {
                entries.push(MergeEntry {
                    target,
                    route: None,
                    group: Some(field.name),
                });
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[MergeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

type TableKey = (TypeId, TypeId, TypeId);

static TABLES: OnceLock<DashMap<TableKey, Arc<MergeTable>>> = OnceLock::new();

/// Fetch the memoized merge table for a schema triple, building it on
/// first use.
///
/// Concurrent first builds for the same triple are serialized by the
/// map's shard lock, so a reader never observes a partially-built
/// table; after publication the table is immutable for the process
/// lifetime.
pub fn merge_table_for<T, R, G>() -> Arc<MergeTable>
where
    T: TargetSchema + 'static,
    R: Schema + 'static,
    G: Schema + 'static,
{
    let tables = TABLES.get_or_init(DashMap::new);
    let key = (TypeId::of::<T>(), TypeId::of::<R>(), TypeId::of::<G>());
    let entry = tables.entry(key).or_insert_with(|| {
        let table = MergeTable::build::<T, R, G>();
        debug!(entries = table.len(), "built field-merge table");
        Arc::new(table)
    });
    Arc::clone(entry.value())
}

/// The default merge mapper: `(route, group, root_path)` to one
/// resolved descriptor.
///
/// Copy-matched fields follow the precedence chain (route value wins,
/// else group value, else the target default stays), then the derived
/// fields are computed:
///
/// - the upstream path template is `root_path` + the group's root path
///   + the route's upstream template (downstream template when unset),
///   concatenated verbatim with no separator normalization;
/// - the QoS timeout is the route's timeout, else the group's, else
///   zero, in whole milliseconds.
///
/// Absent optional inputs degrade to these fallbacks, never to an
/// error.
pub fn default_mapper<G>(route: &G::Route, group: &G, root_path: &str) -> RouteDescriptor
where
    G: RouteGroupSpec,
{
    let table = merge_table_for::<RouteDescriptor, G::Route, G>();
    let mut descriptor = RouteDescriptor::default();

    for entry in table.entries() {
        let value = entry
            .route
            .and_then(|field| route.get(field))
            .or_else(|| entry.group.and_then(|field| group.get(field)));
        if let Some(value) = value {
            descriptor.set(entry.target.name, value);
        }
    }

    let upstream = route
        .upstream_path_template()
        .unwrap_or_else(|| route.downstream_path_template());
    descriptor.upstream_path_template =
        format!("{}{}{}", root_path, group.root_path(), upstream);

    let timeout = route.timeout().or(group.timeout()).unwrap_or_default();
    descriptor.qos_options.timeout_ms = timeout.as_millis() as u64;

    descriptor
}
