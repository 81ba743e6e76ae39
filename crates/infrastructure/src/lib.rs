//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_resource_gateway;
mod identity_endpoint;

pub use http_resource_gateway::HttpResourceGateway;
pub use identity_endpoint::{ConfiguredIdentityEndpoint, InfoDocumentEndpointResolver};
