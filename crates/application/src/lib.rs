//! Application services and ports.

#![forbid(unsafe_code)]

mod gateway_ports;
mod user_service;

pub use gateway_ports::{
    GatewayRequest, HttpMethod, IdentityEndpointResolver, ResourceGateway, ResourceVisitor,
};
pub use user_service::UserService;
