//! VIP membership records as read from an export

use std::fmt;

/// Rendered in place of a missing column or an empty cell
pub const NOT_AVAILABLE: &str = "N/A";

/// Membership status as written by the parking system
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VipStatus {
    Active,
    Refunded,
    Expired,
    Other(String),
}

impl VipStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "生效中" => Self::Active,
            "已退款" => Self::Refunded,
            "已过期" => Self::Expired,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Active => "生效中",
            Self::Refunded => "已退款",
            Self::Expired => "已过期",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for VipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Positions of the well-known columns within a record's field list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldIndex {
    pub vip_type: Option<usize>,
    pub status: Option<usize>,
    pub start_time: Option<usize>,
    pub end_time: Option<usize>,
    pub owner: Option<usize>,
    pub phone: Option<usize>,
}

/// One export row that carried a valid plate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VipRecord {
    pub plate: String,
    /// Every column of the row in header order; `None` for empty cells
    pub fields: Vec<(String, Option<String>)>,
    pub index: FieldIndex,
}

impl VipRecord {
    fn field(&self, idx: Option<usize>) -> Option<&str> {
        idx.and_then(|i| self.fields.get(i))
            .and_then(|(_, value)| value.as_deref())
    }

    fn display_field(&self, idx: Option<usize>) -> &str {
        self.field(idx).unwrap_or(NOT_AVAILABLE)
    }

    pub fn vip_type(&self) -> &str {
        self.display_field(self.index.vip_type)
    }

    pub fn status_text(&self) -> &str {
        self.display_field(self.index.status)
    }

    /// Parsed status, `None` when the export has no status value
    pub fn status(&self) -> Option<VipStatus> {
        self.field(self.index.status).map(VipStatus::parse)
    }

    pub fn start_time(&self) -> &str {
        self.display_field(self.index.start_time)
    }

    pub fn end_time(&self) -> &str {
        self.display_field(self.index.end_time)
    }

    /// Raw end time for validity checks
    pub fn end_time_value(&self) -> Option<&str> {
        self.field(self.index.end_time)
    }

    pub fn owner(&self) -> &str {
        self.display_field(self.index.owner)
    }

    pub fn phone(&self) -> &str {
        self.display_field(self.index.phone)
    }

    pub fn is_active(&self) -> bool {
        self.status() == Some(VipStatus::Active)
    }

    pub fn is_refunded(&self) -> bool {
        self.status() == Some(VipStatus::Refunded)
    }

    pub fn is_expired(&self) -> bool {
        self.status() == Some(VipStatus::Expired)
    }

    /// Columns that hold a value, in header order
    pub fn present_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter_map(|(column, value)| value.as_deref().map(|v| (column.as_str(), v)))
    }
}
