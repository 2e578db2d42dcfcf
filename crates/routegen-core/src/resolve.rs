use tracing::{debug, trace};

use crate::descriptor::{HostAndPort, RouteDescriptor};
use crate::merge::default_mapper;
use crate::model::{GatewayRoutes, RouteGroupSpec};
use crate::options::MapOptions;

/// Resolve every route declared under the gateway's group slots into a
/// flat, ordered list of descriptors.
///
/// Slots are visited in declaration order, routes within a group in
/// sequence order; the output order is exactly that nesting. Unset
/// slots and groups without routes contribute nothing. Every
/// descriptor produced under one group gets that group's host/port
/// binding appended after the mapper runs.
///
/// No sorting, deduplication, or conflict detection happens here: two
/// routes resolving to the same upstream template are both emitted and
/// left to the downstream consumer.
pub fn build_routes<Gw>(gateway: &Gw, options: &MapOptions<Gw::Group>) -> Vec<RouteDescriptor>
where
    Gw: GatewayRoutes,
{
    let mut resolved = Vec::new();

    for (slot, group) in gateway.group_slots() {
        let Some(group) = group else {
            trace!(slot, "group slot unset, skipping");
            continue;
        };
        let routes = group.routes();
        if routes.is_empty() {
            trace!(slot, "group declares no routes, skipping");
            continue;
        }

        let binding = HostAndPort {
            host: group.host().to_string(),
            port: group.port(),
        };
        for route in routes {
            let mut descriptor = match &options.mapper {
                Some(mapper) => mapper(route, group, gateway.root_path()),
                None => default_mapper(route, group, gateway.root_path()),
            };
            descriptor.downstream_host_and_ports.push(binding.clone());
            resolved.push(descriptor);
        }
        debug!(slot, routes = routes.len(), "resolved route group");
    }

    resolved
}
