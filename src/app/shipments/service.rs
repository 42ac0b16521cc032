//! 发货单业务服务

use tracing::debug;
use validator::Validate;

use super::enrichment::{enrich, enrich_all};
use super::model::{Shipment, ShipmentPayload, ShipmentView};
use super::pricing::compute_total;
use crate::app::customers::Customer;
use crate::core::error::CoreError;
use crate::infrastructure::{Repository, Stored};

#[derive(Clone)]
pub struct ShipmentService {
    shipments: Repository<Shipment>,
    customers: Repository<Customer>,
}

impl ShipmentService {
    pub fn new(shipments: Repository<Shipment>, customers: Repository<Customer>) -> Self {
        Self {
            shipments,
            customers,
        }
    }

    pub async fn list(&self) -> Result<Vec<ShipmentView>, CoreError> {
        let shipments = self.shipments.list().await?;
        let customers = self.customers.list().await?;
        Ok(enrich_all(shipments, &customers))
    }

    pub async fn get(&self, id: &str) -> Result<ShipmentView, CoreError> {
        let shipment = self.shipments.get(id).await?;
        let customers = self.customers.list().await?;
        Ok(enrich(shipment, &customers))
    }

    pub async fn create(&self, payload: ShipmentPayload) -> Result<Stored<Shipment>, CoreError> {
        let shipment = Self::build(payload)?;
        Ok(self.shipments.create(shipment).await?)
    }

    pub async fn replace(
        &self,
        id: &str,
        payload: ShipmentPayload,
    ) -> Result<Stored<Shipment>, CoreError> {
        let shipment = Self::build(payload)?;
        Ok(self.shipments.replace(id, shipment).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        Ok(self.shipments.delete(id).await?)
    }

    /// 校验请求体并重新计算总额，状态重置为未发货
    fn build(payload: ShipmentPayload) -> Result<Shipment, CoreError> {
        payload.validate()?;

        let line_items = payload.produtos_clientes.unwrap_or_default();
        let total = compute_total(&line_items)?;
        debug!("{} 个明细项，总额 {}", line_items.len(), total);

        Ok(Shipment {
            customer_id: payload.cliente_id.unwrap_or_default(),
            line_items,
            total,
            status: false,
        })
    }
}
