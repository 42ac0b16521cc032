//! 发货单金额计算
//!
//! 每个明细项的 `preco` 按宽松的数值转换规则转成数字后从 0 开始依次累加：
//! 数字原样使用；字符串去掉首尾空白，空串为 0，否则按十进制（或 0x/0o/0b 前缀）解析；
//! `null` 为 0；布尔值为 1/0；缺失、数组、对象以及非对象的明细项都不是数字。
//! 任何一项无法转成有限数字时直接拒绝，而不是产生非数字的总额。

use serde_json::{Number, Value};

use crate::core::error::CoreError;

/// 能精确表示为整数的最大 f64
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("produtos_clientes[{index}]: preco ausente ou não numérico.")]
    NotNumeric { index: usize },

    #[error("valor_total não é um número finito.")]
    NonFiniteTotal,
}

impl From<PricingError> for CoreError {
    fn from(err: PricingError) -> Self {
        CoreError::BadRequest(err.to_string())
    }
}

/// 计算明细项总额
pub fn compute_total(line_items: &[Value]) -> Result<Number, PricingError> {
    let mut total = 0.0_f64;
    for (index, item) in line_items.iter().enumerate() {
        let price = item
            .as_object()
            .and_then(|fields| coerce_number(fields.get("preco")))
            .filter(|value| value.is_finite())
            .ok_or(PricingError::NotNumeric { index })?;
        total += price;
    }

    total_to_number(total).ok_or(PricingError::NonFiniteTotal)
}

/// 数值转换，`None` 表示不是数字
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Null => Some(0.0),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_str(s),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_numeric_str(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
        }
    }

    // f64::from_str 还接受 "inf"、"nan" 等写法，这里只放行十进制字面量
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    s.parse().ok()
}

/// 整数值输出为 JSON 整数（15 而不是 15.0）
pub fn total_to_number(total: f64) -> Option<Number> {
    if !total.is_finite() {
        return None;
    }
    if total.fract() == 0.0 && total.abs() <= MAX_SAFE_INTEGER {
        return Some(Number::from(total as i64));
    }
    Number::from_f64(total)
}
