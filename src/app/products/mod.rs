pub mod handler;
pub mod model;
pub mod service;

pub use model::{Product, ProductPayload};
pub use service::ProductService;
