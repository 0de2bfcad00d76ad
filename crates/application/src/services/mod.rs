//! Application services - Use case implementations

mod route_list_view_model;

pub use route_list_view_model::{RouteListState, RouteListViewModel, RouteRow};
