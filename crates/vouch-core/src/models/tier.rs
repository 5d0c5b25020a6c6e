use std::fmt;

use serde::{Deserialize, Serialize};

/// Trust tiers, ordered from least to most trusted.
///
/// # Examples
///
/// ```
/// use vouch_core::TrustTier;
///
/// assert!(TrustTier::Gold > TrustTier::Silver);
/// assert_eq!(TrustTier::from_u8(4), Some(TrustTier::Platinum));
/// assert_eq!(TrustTier::Unrated.next(), Some(TrustTier::Bronze));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TrustTier {
    #[default]
    Unrated = 0,
    Bronze = 1,
    Silver = 2,
    Gold = 3,
    Platinum = 4,
}

impl TrustTier {
    /// Every rated tier, easiest first.
    pub const RATED: [TrustTier; 4] = [Self::Bronze, Self::Silver, Self::Gold, Self::Platinum];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Unrated),
            1 => Some(Self::Bronze),
            2 => Some(Self::Silver),
            3 => Some(Self::Gold),
            4 => Some(Self::Platinum),
            _ => None,
        }
    }

    /// The tier directly above this one.
    pub fn next(self) -> Option<Self> {
        Self::from_u8(self.as_u8() + 1)
    }
}

impl fmt::Display for TrustTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unrated => "unrated",
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        };
        f.write_str(name)
    }
}
