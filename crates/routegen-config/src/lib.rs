//! Routegen config — the configuration-sink adapter.
//!
//! Resolves a gateway declaration with routegen-core, serializes the
//! descriptor list under a top-level `routes` key, and layers the
//! resulting JSON into a `config` builder as a string source, where it
//! sits alongside whatever other providers the application stacks up.

pub mod error;

use config::builder::DefaultState;
use config::{ConfigBuilder, File, FileFormat};
use tracing::debug;

use routegen_core::{build_routes, GatewayRoutes, MapOptions};

pub use error::SinkError;

/// Resolve the gateway and wrap the descriptor list under a `routes`
/// key, as a JSON value.
pub fn routes_value<Gw>(
    gateway: &Gw,
    options: &MapOptions<Gw::Group>,
) -> Result<serde_json::Value, SinkError>
where
    Gw: GatewayRoutes,
{
    let routes = build_routes(gateway, options);
    debug!(routes = routes.len(), "serializing resolved routes");
    let routes = serde_json::to_value(routes)?;
    Ok(serde_json::json!({ "routes": routes }))
}

/// Resolve the gateway and render the `routes` wrapper as a JSON
/// string, ready for a string-backed configuration source.
pub fn routes_json<Gw>(gateway: &Gw, options: &MapOptions<Gw::Group>) -> Result<String, SinkError>
where
    Gw: GatewayRoutes,
{
    let value = routes_value(gateway, options)?;
    Ok(value.to_string())
}

/// Fluent extension for layering resolved gateway routes into a
/// `config` builder.
pub trait GatewayRoutesExt: Sized {
    /// Resolve `gateway` with `options` and add the result as a JSON
    /// string source.
    fn add_gateway_routes<Gw>(
        self,
        gateway: &Gw,
        options: &MapOptions<Gw::Group>,
    ) -> Result<Self, SinkError>
    where
        Gw: GatewayRoutes;

    /// Shorthand for [`add_gateway_routes`](Self::add_gateway_routes)
    /// with default options (the library's merge mapper).
    fn add_default_gateway_routes<Gw>(self, gateway: &Gw) -> Result<Self, SinkError>
    where
        Gw: GatewayRoutes,
    {
        self.add_gateway_routes(gateway, &MapOptions::default())
    }
}

impl GatewayRoutesExt for ConfigBuilder<DefaultState> {
    fn add_gateway_routes<Gw>(
        self,
        gateway: &Gw,
        options: &MapOptions<Gw::Group>,
    ) -> Result<Self, SinkError>
    where
        Gw: GatewayRoutes,
    {
        let json = routes_json(gateway, options)?;
        Ok(self.add_source(File::from_str(&json, FileFormat::Json)))
    }
}
