pub mod item_routes;
pub mod system_routes;
