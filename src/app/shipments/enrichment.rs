//! 发货单附加客户名称，不修改已存储的记录
//!
//! 记录按原样读取：`cliente_id` 与客户 `id` 按 JSON 值严格相等匹配，
//! 缺少字段或类型不符的记录只会匹配不到，不会导致整个列表失败。

use serde_json::Value;
use std::collections::HashMap;

use super::model::ShipmentView;
use crate::infrastructure::Record;

/// 找不到客户时使用的名称
pub const CUSTOMER_NOT_FOUND: &str = "Cliente não encontrado";

/// 匹配到客户时返回其 `nome`（缺失为 null），否则返回占位名称
pub fn resolve_customer_name(shipment: &Record, customers: &[Record]) -> Value {
    let customer = shipment
        .get("cliente_id")
        .and_then(|key| customers.iter().find(|customer| customer.get("id") == Some(key)));
    name_of(customer)
}

pub fn enrich(shipment: Record, customers: &[Record]) -> ShipmentView {
    let name = resolve_customer_name(&shipment, customers);
    with_name(shipment, name)
}

/// 列表场景对字符串 ID 先建索引，重复 ID 时与线性查找一样取第一个
pub fn enrich_all(shipments: Vec<Record>, customers: &[Record]) -> Vec<ShipmentView> {
    let mut by_id: HashMap<&str, &Record> = HashMap::with_capacity(customers.len());
    for customer in customers {
        if let Some(id) = customer.get("id").and_then(Value::as_str) {
            by_id.entry(id).or_insert(customer);
        }
    }

    shipments
        .into_iter()
        .map(|shipment| {
            let name = match shipment.get("cliente_id") {
                Some(Value::String(key)) => name_of(by_id.get(key.as_str()).copied()),
                _ => resolve_customer_name(&shipment, customers),
            };
            with_name(shipment, name)
        })
        .collect()
}

fn name_of(customer: Option<&Record>) -> Value {
    match customer {
        Some(customer) => customer.get("nome").cloned().unwrap_or(Value::Null),
        None => Value::String(CUSTOMER_NOT_FOUND.to_string()),
    }
}

fn with_name(mut shipment: Record, name: Value) -> ShipmentView {
    shipment.insert("cliente_nome".to_string(), name);
    ShipmentView(shipment)
}
