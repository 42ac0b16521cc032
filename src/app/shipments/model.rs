//! 发货单数据模型

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use validator::Validate;

use crate::infrastructure::{Collection, Entity, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    /// 客户 ID，仅在读取时解析，写入时不校验
    #[serde(rename = "cliente_id")]
    pub customer_id: String,
    /// 明细项原样透传，至少包含 `preco`
    #[serde(rename = "produtos_clientes")]
    pub line_items: Vec<Value>,
    /// 由明细项计算，从不接受客户端的值
    #[serde(rename = "valor_total")]
    pub total: Number,
    /// 是否已发货，创建和替换时重置为 false
    pub status: bool,
}

impl Entity for Shipment {
    const COLLECTION: Collection = Collection::Shipments;
}

/// 创建和替换发货单的请求体，`valor_total` 与 `status` 即使提交也会被忽略
#[derive(Debug, Deserialize, Validate)]
pub struct ShipmentPayload {
    #[validate(
        required(message = "Campos obrigatórios: cliente_id, produtos_clientes (array)."),
        length(min = 1, message = "Campos obrigatórios: cliente_id, produtos_clientes (array).")
    )]
    pub cliente_id: Option<String>,

    #[validate(required(message = "Campos obrigatórios: cliente_id, produtos_clientes (array)."))]
    pub produtos_clientes: Option<Vec<Value>>,
}

/// 返回给客户端的发货单：存储中的记录原样加上 `cliente_nome`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShipmentView(pub Record);
