//! 路由

use axum::{middleware, routing::get, Router};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::{customers, health, products, shipments, AppState};
use crate::core::middleware::request_logging_middleware;

pub fn build_router(state: AppState, timeout: Duration) -> Router {
    Router::new()
        .route(
            "/produtos",
            get(products::handler::list_products).post(products::handler::create_product),
        )
        .route(
            "/produtos/:id",
            get(products::handler::get_product)
                .put(products::handler::update_product)
                .delete(products::handler::delete_product),
        )
        .route(
            "/clientes",
            get(customers::handler::list_customers).post(customers::handler::create_customer),
        )
        .route(
            "/clientes/:id",
            get(customers::handler::get_customer)
                .put(customers::handler::update_customer)
                .delete(customers::handler::delete_customer),
        )
        .route(
            "/envios",
            get(shipments::handler::list_shipments).post(shipments::handler::create_shipment),
        )
        .route(
            "/envios/:id",
            get(shipments::handler::get_shipment)
                .put(shipments::handler::update_shipment)
                .delete(shipments::handler::delete_shipment),
        )
        .route("/health", get(health::health_check))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(timeout))
        .with_state(state)
}
