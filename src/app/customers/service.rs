//! 客户业务服务

use validator::Validate;

use super::model::{Customer, CustomerPayload};
use crate::core::error::CoreError;
use crate::infrastructure::{Record, Repository, Stored};

#[derive(Clone)]
pub struct CustomerService {
    repo: Repository<Customer>,
}

impl CustomerService {
    pub fn new(repo: Repository<Customer>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Record>, CoreError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Record, CoreError> {
        Ok(self.repo.get(id).await?)
    }

    pub async fn create(&self, payload: CustomerPayload) -> Result<Stored<Customer>, CoreError> {
        payload.validate()?;
        Ok(self.repo.create(payload.into_customer()).await?)
    }

    pub async fn replace(
        &self,
        id: &str,
        payload: CustomerPayload,
    ) -> Result<Stored<Customer>, CoreError> {
        payload.validate()?;
        Ok(self.repo.replace(id, payload.into_customer()).await?)
    }

    /// 删除客户不影响引用它的发货单
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        Ok(self.repo.delete(id).await?)
    }
}
