//! 客户数据模型

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::infrastructure::{Collection, Entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "endereco")]
    pub address: String,
}

impl Entity for Customer {
    const COLLECTION: Collection = Collection::Customers;
}

#[derive(Debug, Deserialize, Validate)]
pub struct CustomerPayload {
    #[validate(
        required(message = "Nome e endereço são obrigatórios."),
        length(min = 1, message = "Nome e endereço são obrigatórios.")
    )]
    pub nome: Option<String>,

    #[validate(
        required(message = "Nome e endereço são obrigatórios."),
        length(min = 1, message = "Nome e endereço são obrigatórios.")
    )]
    pub endereco: Option<String>,
}

impl CustomerPayload {
    /// 校验通过后调用
    pub fn into_customer(self) -> Customer {
        Customer {
            name: self.nome.unwrap_or_default(),
            address: self.endereco.unwrap_or_default(),
        }
    }
}
