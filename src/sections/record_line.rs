use crate::record::VipStatus;
use once_cell::sync::Lazy;
use regex::Regex;

static ORDINAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d+\.\s+)+").expect("Invalid regex pattern"));
static VIP_TYPE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"VIP类型: (.*?)(?:, 状态:|$)").expect("Invalid regex pattern"));
static STATUS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"状态: ([^,]*)").expect("Invalid regex pattern"));
static PERIOD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"有效期: (.+?) ~ (.+)$").expect("Invalid regex pattern"));

/// A record line of a generated report, e.g.
/// `2. VIP类型: 月卡, 状态: 已退款, 有效期: 2025-01-01 ~ 2026-01-01`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLine {
    /// Line text without leading ordinals
    pub text: String,
    pub vip_type: Option<String>,
    pub status: Option<VipStatus>,
    pub period: Option<(String, String)>,
}

impl RecordLine {
    pub fn parse(line: &str) -> Self {
        let text = ORDINAL_REGEX.replace(line.trim(), "").trim().to_string();

        let capture = |re: &Regex| {
            re.captures(&text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
        };
        let vip_type = capture(&VIP_TYPE_REGEX);
        let status = capture(&STATUS_REGEX).map(|s| VipStatus::parse(&s));
        let period = PERIOD_REGEX.captures(&text).and_then(|caps| {
            Some((
                caps.get(1)?.as_str().trim().to_string(),
                caps.get(2)?.as_str().trim().to_string(),
            ))
        });

        Self {
            text,
            vip_type,
            status,
            period,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == Some(VipStatus::Active)
    }

    pub fn is_refunded(&self) -> bool {
        self.status == Some(VipStatus::Refunded)
    }

    /// Exact VIP type match; `停用` does not match `停用tcjc`
    pub fn vip_type_is(&self, vip_type: &str) -> bool {
        self.vip_type.as_deref() == Some(vip_type)
    }

    pub fn vip_type_contains(&self, needle: &str) -> bool {
        self.vip_type
            .as_deref()
            .is_some_and(|t| t.contains(needle))
    }
}
