use bigdecimal::{BigDecimal, ToPrimitive};
use num_traits::Zero;
use serde::ser::SerializeTuple;
use serde::Serializer;

/// BigDecimal 转 f64，超出范围时为 0
pub fn to_f64_lossy(value: &BigDecimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// 以 JSON 数字输出 BigDecimal
pub fn serialize_as_f64<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(to_f64_lossy(value))
}

/// 以 `[a, b]` 数字数组输出价格比例
pub fn serialize_ratio_as_f64<S>(
    ratio: &(BigDecimal, BigDecimal),
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut tuple = serializer.serialize_tuple(2)?;
    tuple.serialize_element(&to_f64_lossy(&ratio.0))?;
    tuple.serialize_element(&to_f64_lossy(&ratio.1))?;
    tuple.end()
}

/// 按有效位数格式化汇率，便于终端显示
pub fn format_rate(rate: &BigDecimal, significant_digits: u64) -> String {
    if rate.is_zero() {
        return "0".to_string();
    }
    rate.with_prec(significant_digits).normalized().to_string()
}
