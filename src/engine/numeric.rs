// ==========================================
// 施工材料台账系统 - 数值归一化
// ==========================================
// 职责: 宽松数值解析（JSON 数字/数字字符串）+ 金额舍入
// 红线: 解析规则全局唯一，禁止各处散落 ad-hoc parse
// ==========================================

use serde_json::Value;

/// 从 JSON 值解析 f64
///
/// 接受:
/// - JSON 数字
/// - 数字字符串（trim 后整串解析）
///
/// 拒绝（返回 None）:
/// - null / bool / 数组 / 对象
/// - 空串或非数字字符串
/// - NaN / Infinity（避免污染合计）
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

/// 宽松解析：解析失败或字段缺失时取缺省值
///
/// 用于可选数值字段（需求数量/需求金额），缺省 0
pub fn parse_number_or_default(value: Option<&Value>, default: f64) -> f64 {
    value.and_then(parse_number).unwrap_or(default)
}

/// 金额舍入到 2 位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
