//! 优先级代码与截单规则

use chrono::NaiveTime;
use phf::phf_map;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 各有效优先级代码对应的显示名称
static PRIORITY_LABELS: phf::Map<u8, &'static str> = phf_map! {
    1u8 => "URGENTE",
    2u8 => "URGENTE LOCAL",
    3u8 => "LOCAL / FORÁNEO EN TIEMPO",
    4u8 => "LOCAL",
    5u8 => "LOCAL RUTA",
    6u8 => "FORÁNEO EXPRESS",
    7u8 => "FORÁNEO PAQUETERÍA",
    8u8 => "FORÁNEO DEDICADO",
    9u8 => "CIUDAD REMOTA",
    10u8 => "PROGRAMADO",
    11u8 => "MUESTRAS",
    16u8 => "LOCAL FUERA DE CORTE",
    17u8 => "FORÁNEO FUERA DE CORTE",
    18u8 => "REMOTO FUERA DE CORTE",
};

/// 获取优先级显示名称，未知代码显示为 `P<代码>`
pub fn priority_label(code: u8) -> String {
    PRIORITY_LABELS
        .get(&code)
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("P{}", code))
}

/// 实时优先级规则
///
/// 按顺序匹配，先命中者生效：
/// 1. 固定代码永不升级
/// 2. 本地代码过了本地截单时间升级
/// 3. 外地加急代码过了外地截单时间升级
/// 4. 远程城市代码过了其截单时间升级
/// 5. 本地/外地代码在截单前统一为"尚未紧急"
/// 6. 其余代码原样通过
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityRules {
    /// 所有可识别的原始代码
    pub known_codes: Vec<u8>,
    /// 固定代码
    pub pinned: Vec<u8>,
    /// 本地代码
    pub local_band: Vec<u8>,
    #[serde(serialize_with = "serialize_hhmm", deserialize_with = "deserialize_hhmm")]
    pub local_cutoff: NaiveTime,
    pub local_escalated: u8,
    /// 外地加急代码
    pub far_band: Vec<u8>,
    #[serde(serialize_with = "serialize_hhmm", deserialize_with = "deserialize_hhmm")]
    pub far_cutoff: NaiveTime,
    pub far_escalated: u8,
    /// 远程城市代码
    pub remote_city: u8,
    #[serde(serialize_with = "serialize_hhmm", deserialize_with = "deserialize_hhmm")]
    pub remote_cutoff: NaiveTime,
    pub remote_escalated: u8,
    /// 截单前本地/外地代码共享的等级
    pub not_yet_urgent: u8,
}

impl Default for PriorityRules {
    fn default() -> Self {
        Self {
            known_codes: (1..=11).collect(),
            pinned: vec![1, 2, 8],
            local_band: vec![3, 4, 5],
            local_cutoff: hhmm(12, 45),
            local_escalated: 16,
            far_band: vec![6, 7],
            far_cutoff: hhmm(15, 0),
            far_escalated: 17,
            remote_city: 9,
            remote_cutoff: hhmm(16, 0),
            remote_escalated: 18,
            not_yet_urgent: 3,
        }
    }
}

impl PriorityRules {
    /// 原始代码是否可识别
    pub fn is_known(&self, code: u8) -> bool {
        self.known_codes.contains(&code)
    }
}

fn hhmm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// 解析 "HH:MM" 或 "HH:MM:SS" 格式的时间
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

fn serialize_hhmm<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&time.format("%H:%M").to_string())
}

fn deserialize_hhmm<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_hhmm(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("无法解析时间 '{}'，应为 HH:MM", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(priority_label(16), "LOCAL FUERA DE CORTE");
        assert_eq!(priority_label(42), "P42");
    }

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(parse_hhmm("12:45"), Some(hhmm(12, 45)));
        assert_eq!(parse_hhmm(" 07:05:00 "), Some(hhmm(7, 5)));
        assert_eq!(parse_hhmm("medio día"), None);
    }

    #[test]
    fn test_rules_from_toml() {
        let rules: PriorityRules = toml::from_str(
            r#"
            local_cutoff = "13:00"
            pinned = [1]
            "#,
        )
        .unwrap();

        assert_eq!(rules.local_cutoff, hhmm(13, 0));
        assert_eq!(rules.pinned, vec![1]);
        assert_eq!(rules.far_cutoff, hhmm(15, 0));
    }
}
