//! Adapters implementing application ports

mod route_adapter;

pub use route_adapter::{RouteAdapter, map_client_error};
