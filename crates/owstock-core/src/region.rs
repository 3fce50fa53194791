//! Australian state and territory codes used to group stores.

use std::fmt;
use std::str::FromStr;

use crate::stock::StoreRecord;

/// A state or territory code as it appears in the store directory's
/// `address.storeState` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Act,
    Nsw,
    Nt,
    Qld,
    Sa,
    Tas,
    Vic,
    Wa,
}

impl Region {
    pub const ALL: [Region; 8] = [
        Region::Act,
        Region::Nsw,
        Region::Nt,
        Region::Qld,
        Region::Sa,
        Region::Tas,
        Region::Vic,
        Region::Wa,
    ];

    /// Canonical upper-case code, e.g. `"NSW"`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Region::Act => "ACT",
            Region::Nsw => "NSW",
            Region::Nt => "NT",
            Region::Qld => "QLD",
            Region::Sa => "SA",
            Region::Tas => "TAS",
            Region::Vic => "VIC",
            Region::Wa => "WA",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Raised when a `--state` value is not one of the known codes or `all`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid state \"{0}\": expected one of ACT, NSW, NT, QLD, SA, TAS, VIC, WA, all")]
pub struct RegionParseError(pub String);

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| RegionParseError(s.to_string()))
    }
}

/// Which stores a run should check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    /// `true` for a single-region filter. Output lines omit the region
    /// suffix in that case since every reported store shares it.
    #[must_use]
    pub fn is_single_region(self) -> bool {
        matches!(self, RegionFilter::Only(_))
    }

    /// Case-sensitive comparison against the canonical code. A store with no
    /// recorded state only passes [`RegionFilter::All`].
    #[must_use]
    pub fn matches(self, store_region: Option<&str>) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(region) => store_region == Some(region.code()),
        }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFilter::All => f.write_str("all"),
            RegionFilter::Only(region) => f.write_str(region.code()),
        }
    }
}

impl FromStr for RegionFilter {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(RegionFilter::All);
        }
        s.parse().map(RegionFilter::Only)
    }
}

/// Order-preserving selection of the stores that match `filter`.
#[must_use]
pub fn filter_stores(stores: &[StoreRecord], filter: RegionFilter) -> Vec<&StoreRecord> {
    stores.iter().filter(|s| filter.matches(s.region.as_deref())).collect()
}
