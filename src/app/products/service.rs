//! 产品业务服务

use validator::Validate;

use super::model::{Product, ProductPayload};
use crate::core::error::CoreError;
use crate::infrastructure::{Record, Repository, Stored};

#[derive(Clone)]
pub struct ProductService {
    repo: Repository<Product>,
}

impl ProductService {
    pub fn new(repo: Repository<Product>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Record>, CoreError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Record, CoreError> {
        Ok(self.repo.get(id).await?)
    }

    pub async fn create(&self, payload: ProductPayload) -> Result<Stored<Product>, CoreError> {
        payload.validate()?;
        Ok(self.repo.create(payload.into_product()).await?)
    }

    pub async fn replace(
        &self,
        id: &str,
        payload: ProductPayload,
    ) -> Result<Stored<Product>, CoreError> {
        payload.validate()?;
        Ok(self.repo.replace(id, payload.into_product()).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        Ok(self.repo.delete(id).await?)
    }
}
