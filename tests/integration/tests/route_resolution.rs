//! Integration test: full gateway declarations resolved end to end
//! through routegen-core.

use routegen_core::{build_routes, HostAndPort, MapOptions, Route, RouteDescriptor, RouteGroup};
use routegen_integration_tests::{route, storefront, StorefrontGateway};
use std::time::Duration;

#[test]
fn test_descriptor_count_is_sum_of_populated_groups() {
    let gateway = storefront();
    let resolved = build_routes(&gateway, &MapOptions::default());

    // users declares 2 routes, orders 1, payments is unset.
    assert_eq!(resolved.len(), 3);
}

#[test]
fn test_upstream_paths_compose_across_levels() {
    let resolved = build_routes(&storefront(), &MapOptions::default());

    assert_eq!(resolved[0].upstream_path_template, "/api/users/{id}");
    // Unset upstream template falls back to the downstream template.
    assert_eq!(resolved[1].upstream_path_template, "/api/users/");
    // Explicit upstream template is used as declared.
    assert_eq!(resolved[2].upstream_path_template, "/api/orders/list");
}

#[test]
fn test_timeout_precedence_route_over_group() {
    let resolved = build_routes(&storefront(), &MapOptions::default());

    // No route timeout: the group's 45s applies.
    assert_eq!(resolved[0].qos_options.timeout_ms, 45_000);
    // Route timeout of 5s beats the group's 45s.
    assert_eq!(resolved[1].qos_options.timeout_ms, 5_000);
    // orders keeps the stock one-minute group default.
    assert_eq!(resolved[2].qos_options.timeout_ms, 60_000);
}

#[test]
fn test_priority_precedence_and_fallback() {
    let resolved = build_routes(&storefront(), &MapOptions::default());

    // Neither route nor group set: target default.
    assert_eq!(resolved[0].priority, 0);
    // Route-level value.
    assert_eq!(resolved[1].priority, 2);
    // Group-level value fills the unset route field.
    assert_eq!(resolved[2].priority, 1);
}

#[test]
fn test_bindings_follow_group_configuration() {
    let resolved = build_routes(&storefront(), &MapOptions::default());

    let users_binding = HostAndPort {
        host: "users-svc".into(),
        port: 8080,
    };
    assert_eq!(resolved[0].downstream_host_and_ports, vec![users_binding.clone()]);
    assert_eq!(resolved[1].downstream_host_and_ports, vec![users_binding]);
    // orders never set a port: default 80.
    assert_eq!(
        resolved[2].downstream_host_and_ports,
        vec![HostAndPort {
            host: "orders-svc".into(),
            port: 80,
        }]
    );
}

#[test]
fn test_repeated_resolution_is_element_wise_equal() {
    let gateway = storefront();
    let first = build_routes(&gateway, &MapOptions::default());
    let second = build_routes(&gateway, &MapOptions::default());
    assert_eq!(first, second);
}

#[test]
fn test_input_graph_is_left_untouched() {
    let gateway = storefront();
    let users_before = gateway.users.clone();

    let _ = build_routes(&gateway, &MapOptions::default());
    assert_eq!(gateway.users, users_before);
}

#[test]
fn test_custom_mapper_replaces_default_merge() {
    let gateway = storefront();
    let options = MapOptions::new().with_mapper(
        |route: &Route, group: &RouteGroup<Route>, root_path: &str| RouteDescriptor {
            downstream_path_template: route.downstream_path_template.clone(),
            // A mapper with different composition rules: slash-joined
            // instead of concatenated.
            upstream_path_template: format!(
                "{}{}{}",
                root_path,
                group.root_path,
                route.downstream_path_template
            ),
            qos_options: routegen_core::QosOptions { timeout_ms: 1 },
            ..RouteDescriptor::default()
        },
    );

    let resolved = build_routes(&gateway, &options);
    assert_eq!(resolved.len(), 3);
    for descriptor in &resolved {
        assert_eq!(descriptor.qos_options.timeout_ms, 1);
        // The walker still attaches the binding.
        assert_eq!(descriptor.downstream_host_and_ports.len(), 1);
    }
}

#[test]
fn test_routes_with_concatenation_artifacts_pass_through() {
    // Doubled separators are preserved verbatim; well-formed fragments
    // are the caller's responsibility.
    let gateway = StorefrontGateway {
        root_path: "/api/".into(),
        users: Some(RouteGroup {
            host: "users-svc".into(),
            root_path: "/users/".into(),
            routes: vec![Route {
                upstream_path_template: Some("/{id}".into()),
                ..route("/{id}", &["GET"])
            }],
            ..RouteGroup::default()
        }),
        ..StorefrontGateway::default()
    };

    let resolved = build_routes(&gateway, &MapOptions::default());
    assert_eq!(resolved[0].upstream_path_template, "/api//users//{id}");
}

#[test]
fn test_group_duration_survives_declaration_round_trip() {
    // Groups can come out of serialized declarations; timeouts travel
    // as milliseconds.
    let json = serde_json::json!({
        "host": "users-svc",
        "root_path": "/users",
        "timeout": 30_000,
        "routes": [{ "downstream_path_template": "/{id}" }]
    });
    let group: RouteGroup<Route> = serde_json::from_value(json).expect("valid group");
    assert_eq!(group.timeout, Some(Duration::from_secs(30)));

    let gateway = StorefrontGateway {
        root_path: "/api".into(),
        users: Some(group),
        ..StorefrontGateway::default()
    };
    let resolved = build_routes(&gateway, &MapOptions::default());
    assert_eq!(resolved[0].qos_options.timeout_ms, 30_000);
}
