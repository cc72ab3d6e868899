use serde::{Deserialize, Serialize};

/// T-shirt size of a feature, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
}

impl Size {
    /// Every size in ascending order.
    pub const ALL: [Size; 5] = [Size::XS, Size::S, Size::M, Size::L, Size::XL];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::XS => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::XL => "XL",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "XS" | "xs" => Some(Self::XS),
            "S" | "s" => Some(Self::S),
            "M" | "m" => Some(Self::M),
            "L" | "l" => Some(Self::L),
            "XL" | "xl" => Some(Self::XL),
            _ => None,
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serde adapter for `Option<Size>` that uses the empty string for "no size".
///
/// Clients render the suggested size unconditionally, so a missing size goes
/// over the wire as `""` rather than `null`.
pub mod label_or_empty {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Size;

    pub fn serialize<S>(value: &Option<Size>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.map(|s| s.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Size>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Size::from_str(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown size label '{}'", raw)))
    }
}
