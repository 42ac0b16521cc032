pub mod enrichment;
pub mod handler;
pub mod model;
pub mod pricing;
pub mod service;

pub use enrichment::CUSTOMER_NOT_FOUND;
pub use model::{Shipment, ShipmentPayload, ShipmentView};
pub use service::ShipmentService;
