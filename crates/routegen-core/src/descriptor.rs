use serde::{Deserialize, Serialize};

use crate::schema::{FieldDescriptor, FieldKind, FieldValue, TargetSchema};

/// One downstream host/port binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostAndPort {
    pub host: String,
    pub port: u16,
}

/// Quality-of-service knobs derived during resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QosOptions {
    /// Time the gateway waits for a downstream response before
    /// answering with a timeout status.
    pub timeout_ms: u64,
}

/// The flat, fully-resolved route record the downstream gateway's
/// configuration loader consumes.
///
/// Copy-matched fields are filled by the merge table; the upstream
/// path template, the QoS timeout, and the host/port bindings are
/// derived instead of copied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteDescriptor {
    pub downstream_path_template: String,
    pub upstream_path_template: String,
    pub upstream_http_method: Vec<String>,
    pub downstream_scheme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_is_case_sensitive: Option<bool>,
    pub priority: i64,
    pub qos_options: QosOptions,
    pub downstream_host_and_ports: Vec<HostAndPort>,
}

impl TargetSchema for RouteDescriptor {
    fn fields() -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("downstream_path_template", FieldKind::Str),
            FieldDescriptor::new("upstream_path_template", FieldKind::Str),
            FieldDescriptor::new("upstream_http_method", FieldKind::StrList),
            FieldDescriptor::new("downstream_scheme", FieldKind::Str),
            FieldDescriptor::new("key", FieldKind::Str),
            FieldDescriptor::new("route_is_case_sensitive", FieldKind::Bool),
            FieldDescriptor::new("priority", FieldKind::Int),
        ];
        FIELDS
    }

    fn set(&mut self, field: &str, value: FieldValue) {
        match (field, value) {
            ("downstream_path_template", FieldValue::Str(v)) => {
                self.downstream_path_template = v;
            }
            ("upstream_path_template", FieldValue::Str(v)) => self.upstream_path_template = v,
            ("upstream_http_method", FieldValue::StrList(v)) => self.upstream_http_method = v,
            ("downstream_scheme", FieldValue::Str(v)) => self.downstream_scheme = v,
            ("key", FieldValue::Str(v)) => self.key = Some(v),
            ("route_is_case_sensitive", FieldValue::Bool(v)) => {
                self.route_is_case_sensitive = Some(v);
            }
            ("priority", FieldValue::Int(v)) => self.priority = v,
            // The merge table only routes matched (name, kind) pairs
            // here; anything else is dropped.
            _ => {}
        }
    }
}
