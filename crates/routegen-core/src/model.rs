use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::schema::{FieldDescriptor, FieldKind, FieldValue, Schema};

/// Serde helper to serialize/deserialize `Option<std::time::Duration>`
/// as milliseconds (u64).
mod duration_ms {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(timeout: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match timeout {
            Some(d) => serializer.serialize_some(&(d.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = Option::<u64>::deserialize(deserializer)?;
        Ok(ms.map(Duration::from_millis))
    }
}

/// One endpoint declaration.
///
/// Overridable fields are optional so "unset in the declaration" stays
/// distinguishable from an explicit value; an explicit `Some(0)` still
/// counts as set and wins over the group's value.
pub trait RouteSpec: Schema + Send + Sync + 'static {
    /// The backend-facing path template.
    fn downstream_path_template(&self) -> &str;

    /// The public-facing path template fragment, when declared. Falls
    /// back to the downstream template during resolution.
    fn upstream_path_template(&self) -> Option<&str>;

    /// Per-route timeout, when declared.
    fn timeout(&self) -> Option<Duration>;
}

/// A named collection of routes sharing host, port, scheme, timeout,
/// and path-prefix defaults.
pub trait RouteGroupSpec: Schema + Send + Sync + 'static {
    type Route: RouteSpec;

    /// Downstream host shared by every route in the group.
    fn host(&self) -> &str;

    /// Downstream port shared by every route in the group.
    fn port(&self) -> u16;

    /// Path fragment inserted between the gateway root path and each
    /// route's upstream template.
    fn root_path(&self) -> &str;

    /// Group-level timeout default, when declared.
    fn timeout(&self) -> Option<Duration>;

    /// The group's routes, in declaration order.
    fn routes(&self) -> &[Self::Route];
}

/// The root of a gateway declaration: a shared root path plus a fixed
/// set of named group slots.
///
/// `group_slots` is the declarative replacement for structural
/// reflection: a concrete gateway type enumerates its slots, in
/// declaration order, right next to the struct that declares them.
/// Slots are statically typed `&Self::Group`, so the field's declared
/// type is the discovery contract.
pub trait GatewayRoutes {
    type Group: RouteGroupSpec;

    /// Root path prepended to every upstream path template, e.g. the
    /// path prefix an ingress routes to this gateway.
    fn root_path(&self) -> &str;

    /// Group slots in declaration order. A slot left unset by the
    /// caller is `None` and contributes nothing.
    fn group_slots(&self) -> Vec<(&'static str, Option<&Self::Group>)>;
}

/// The shipped route type, covering the common case. Declare your own
/// type (plus `Schema` and `RouteSpec` impls) when routes carry extra
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Route {
    /// The backend-facing path template.
    pub downstream_path_template: String,
    /// The public-facing path fragment; defaults to the downstream
    /// template when unset.
    pub upstream_path_template: Option<String>,
    /// Accepted HTTP methods. An empty list counts as unset.
    pub upstream_http_method: Vec<String>,
    /// Per-route timeout override.
    #[serde(with = "duration_ms")]
    pub timeout: Option<Duration>,
    /// Per-route priority override.
    pub priority: Option<i64>,
}

impl Schema for Route {
    fn fields() -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("downstream_path_template", FieldKind::Str),
            FieldDescriptor::new("upstream_path_template", FieldKind::Str),
            FieldDescriptor::new("upstream_http_method", FieldKind::StrList),
            FieldDescriptor::new("timeout", FieldKind::Duration),
            FieldDescriptor::new("priority", FieldKind::Int),
        ];
        FIELDS
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        match field {
            "downstream_path_template" => {
                Some(FieldValue::Str(self.downstream_path_template.clone()))
            }
            "upstream_path_template" => {
                self.upstream_path_template.clone().map(FieldValue::Str)
            }
            "upstream_http_method" => {
                if self.upstream_http_method.is_empty() {
                    None
                } else {
                    Some(FieldValue::StrList(self.upstream_http_method.clone()))
                }
            }
            "timeout" => self.timeout.map(FieldValue::Duration),
            "priority" => self.priority.map(FieldValue::Int),
            _ => None,
        }
    }
}

impl RouteSpec for Route {
    fn downstream_path_template(&self) -> &str {
        &self.downstream_path_template
    }

    fn upstream_path_template(&self) -> Option<&str> {
        self.upstream_path_template.as_deref()
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// The shipped route group type, generic over its route type so a
/// custom route type keeps the stock group behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteGroup<R> {
    /// Downstream host for every route in the group.
    pub host: String,
    /// Downstream port for every route in the group.
    pub port: u16,
    /// Downstream scheme for every route in the group.
    pub downstream_scheme: String,
    /// Group-level timeout default.
    #[serde(with = "duration_ms")]
    pub timeout: Option<Duration>,
    /// Path fragment common to every upstream route in the group,
    /// typically the microservice identifier (e.g. `/users`).
    pub root_path: String,
    /// Group-level priority default.
    pub priority: Option<i64>,
    /// The group's routes, in declaration order.
    pub routes: Vec<R>,
}

impl<R> Default for RouteGroup<R> {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 80,
            downstream_scheme: "http".into(),
            timeout: Some(Duration::from_secs(60)),
            root_path: String::new(),
            priority: None,
            routes: Vec::new(),
        }
    }
}

impl<R: RouteSpec> Schema for RouteGroup<R> {
    fn fields() -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("host", FieldKind::Str),
            FieldDescriptor::new("port", FieldKind::Int),
            FieldDescriptor::new("downstream_scheme", FieldKind::Str),
            FieldDescriptor::new("timeout", FieldKind::Duration),
            FieldDescriptor::new("root_path", FieldKind::Str),
            FieldDescriptor::new("priority", FieldKind::Int),
        ];
        FIELDS
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        match field {
            "host" => Some(FieldValue::Str(self.host.clone())),
            "port" => Some(FieldValue::Int(i64::from(self.port))),
            "downstream_scheme" => Some(FieldValue::Str(self.downstream_scheme.clone())),
            "timeout" => self.timeout.map(FieldValue::Duration),
            "root_path" => Some(FieldValue::Str(self.root_path.clone())),
            "priority" => self.priority.map(FieldValue::Int),
            _ => None,
        }
    }
}

impl<R: RouteSpec> RouteGroupSpec for RouteGroup<R> {
    type Route = R;

    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn root_path(&self) -> &str {
        &self.root_path
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn routes(&self) -> &[R] {
        &self.routes
    }
}
