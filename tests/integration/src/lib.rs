//! Shared fixtures for the integration tests: a small storefront
//! gateway with three backend services.

use routegen_core::{GatewayRoutes, Route, RouteGroup};
use std::time::Duration;

/// A gateway declaration the way a real caller writes one: one field
/// per backend service, enumerated in declaration order.
#[derive(Default)]
pub struct StorefrontGateway {
    pub root_path: String,
    pub users: Option<RouteGroup<Route>>,
    pub orders: Option<RouteGroup<Route>>,
    pub payments: Option<RouteGroup<Route>>,
}

impl GatewayRoutes for StorefrontGateway {
    type Group = RouteGroup<Route>;

    fn root_path(&self) -> &str {
        &self.root_path
    }

    fn group_slots(&self) -> Vec<(&'static str, Option<&Self::Group>)> {
        vec![
            ("users", self.users.as_ref()),
            ("orders", self.orders.as_ref()),
            ("payments", self.payments.as_ref()),
        ]
    }
}

pub fn route(downstream: &str, methods: &[&str]) -> Route {
    Route {
        downstream_path_template: downstream.to_string(),
        upstream_http_method: methods.iter().map(|m| m.to_string()).collect(),
        ..Route::default()
    }
}

/// The standard fixture: two populated services and one unset slot.
pub fn storefront() -> StorefrontGateway {
    StorefrontGateway {
        root_path: "/api".into(),
        users: Some(RouteGroup {
            host: "users-svc".into(),
            port: 8080,
            root_path: "/users".into(),
            timeout: Some(Duration::from_secs(45)),
            routes: vec![
                route("/{id}", &["GET"]),
                Route {
                    timeout: Some(Duration::from_secs(5)),
                    priority: Some(2),
                    ..route("/", &["POST"])
                },
            ],
            ..RouteGroup::default()
        }),
        orders: Some(RouteGroup {
            host: "orders-svc".into(),
            root_path: "/orders".into(),
            priority: Some(1),
            routes: vec![Route {
                upstream_path_template: Some("/list".into()),
                ..route("/all", &["GET"])
            }],
            ..RouteGroup::default()
        }),
        payments: None,
    }
}
