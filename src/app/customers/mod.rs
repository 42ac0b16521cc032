pub mod handler;
pub mod model;
pub mod service;

pub use model::{Customer, CustomerPayload};
pub use service::CustomerService;
