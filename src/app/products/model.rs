//! 产品数据模型

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::infrastructure::{Collection, Entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "nome")]
    pub name: String,
    /// 按客户端提交的原样保存（数字或字符串）
    #[serde(rename = "preco")]
    pub price: Value,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "imagem")]
    pub image: String,
}

impl Entity for Product {
    const COLLECTION: Collection = Collection::Products;
}

/// 创建和替换产品的请求体
#[derive(Debug, Deserialize, Validate)]
pub struct ProductPayload {
    #[validate(
        required(message = "Todos os campos são obrigatórios."),
        length(min = 1, message = "Todos os campos são obrigatórios.")
    )]
    pub nome: Option<String>,

    #[validate(
        required(message = "Todos os campos são obrigatórios."),
        custom(function = "validate_price")
    )]
    pub preco: Option<Value>,

    #[validate(
        required(message = "Todos os campos são obrigatórios."),
        length(min = 1, message = "Todos os campos são obrigatórios.")
    )]
    pub descricao: Option<String>,

    #[validate(
        required(message = "Todos os campos são obrigatórios."),
        length(min = 1, message = "Todos os campos são obrigatórios.")
    )]
    pub imagem: Option<String>,
}

impl ProductPayload {
    /// 校验通过后调用
    pub fn into_product(self) -> Product {
        Product {
            name: self.nome.unwrap_or_default(),
            price: self.preco.unwrap_or_default(),
            description: self.descricao.unwrap_or_default(),
            image: self.imagem.unwrap_or_default(),
        }
    }
}

/// 价格必须有值：非零数字或非空字符串
fn validate_price(price: &Value) -> Result<(), ValidationError> {
    let present = match price {
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        _ => false,
    };

    if present {
        Ok(())
    } else {
        let mut err = ValidationError::new("preco");
        err.message = Some("Todos os campos são obrigatórios.".into());
        Err(err)
    }
}
