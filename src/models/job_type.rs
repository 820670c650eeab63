use serde::{Deserialize, Serialize};

/// Single-scan ("fast piecework") job types. Rows worked under one of these
/// are completed in a single step and may not be repeated on the same row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FastJobType {
    LeafPicking,
    SuckerRemoval,
    ShootThinning,
    Other,
}

impl FastJobType {
    pub const ALL: [FastJobType; 4] = [
        FastJobType::LeafPicking,
        FastJobType::SuckerRemoval,
        FastJobType::ShootThinning,
        FastJobType::Other,
    ];

    /// Wire label, as scanned from the field tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            FastJobType::LeafPicking => "LEAF PICKING",
            FastJobType::SuckerRemoval => "SUCKER REMOVAL",
            FastJobType::ShootThinning => "SHOOT THINNING",
            FastJobType::Other => "OTHER",
        }
    }

    pub fn jt_from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "LEAF PICKING" => Some(Self::LeafPicking),
            "SUCKER REMOVAL" => Some(Self::SuckerRemoval),
            "SHOOT THINNING" => Some(Self::ShootThinning),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }

    /// Whether a free-form job label belongs to the fast set.
    pub fn is_fast(label: &str) -> bool {
        Self::jt_from_str(label).is_some()
    }
}
