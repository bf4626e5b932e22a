use axum::Router;

pub mod products;
pub mod resources;
pub mod stock;
pub mod system;

/// Router for all domain endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/resources", resources::router())
        .nest("/stock", stock::router())
}
