//! Board size estimation from unique grid-line counts.

use log::warn;
use serde::{Deserialize, Serialize};

/// Errors raised when building a [`SizeCatalog`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeCatalogError {
    #[error("board size catalog is empty")]
    Empty,
    #[error("board size {size} is below the minimum of 2 lines")]
    SizeTooSmall { size: u32 },
    #[error("default board size {default_size} is below the catalog minimum {min}")]
    DefaultBelowMinimum { default_size: u32, min: u32 },
}

#[derive(Deserialize, Serialize)]
struct SizeCatalogRepr {
    sizes: Vec<u32>,
    default_size: u32,
}

/// Ordered set of canonical board sizes plus the fallback size.
///
/// Sizes are kept ascending and unique; every size is `>= 2` and the default
/// is at least the smallest catalog size.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "SizeCatalogRepr", into = "SizeCatalogRepr")]
pub struct SizeCatalog {
    sizes: Vec<u32>,
    default_size: u32,
}

impl SizeCatalog {
    pub fn new(
        sizes: impl IntoIterator<Item = u32>,
        default_size: u32,
    ) -> Result<Self, SizeCatalogError> {
        let mut sizes: Vec<u32> = sizes.into_iter().collect();
        sizes.sort_unstable();
        sizes.dedup();

        let min = *sizes.first().ok_or(SizeCatalogError::Empty)?;
        if min < 2 {
            return Err(SizeCatalogError::SizeTooSmall { size: min });
        }
        if default_size < min {
            return Err(SizeCatalogError::DefaultBelowMinimum { default_size, min });
        }
        Ok(Self {
            sizes,
            default_size,
        })
    }

    #[inline]
    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    #[inline]
    pub fn default_size(&self) -> u32 {
        self.default_size
    }

    #[inline]
    pub fn min_size(&self) -> u32 {
        self.sizes[0]
    }
}

impl Default for SizeCatalog {
    fn default() -> Self {
        Self {
            sizes: vec![9, 13, 19],
            default_size: 19,
        }
    }
}

impl TryFrom<SizeCatalogRepr> for SizeCatalog {
    type Error = SizeCatalogError;

    fn try_from(repr: SizeCatalogRepr) -> Result<Self, Self::Error> {
        Self::new(repr.sizes, repr.default_size)
    }
}

impl From<SizeCatalog> for SizeCatalogRepr {
    fn from(catalog: SizeCatalog) -> Self {
        Self {
            sizes: catalog.sizes,
            default_size: catalog.default_size,
        }
    }
}

/// Which decision tier produced a size estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeTier {
    /// Both line counts are within one of a catalog size.
    ExactBoth,
    /// One line count is within one of a catalog size.
    ExactOne,
    /// Non-catalog size taken from the line counts.
    BestAvailable,
    /// Nothing matched; the catalog default was used.
    Default,
}

/// Result of board size estimation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeEstimate {
    pub size: u32,
    pub tier: SizeTier,
    pub horizontal_lines: usize,
    pub vertical_lines: usize,
}

impl SizeEstimate {
    /// True when the size fell back to the catalog default.
    #[inline]
    pub fn is_ambiguous(&self) -> bool {
        self.tier == SizeTier::Default
    }
}

#[inline]
fn near(count: usize, size: u32) -> bool {
    count.abs_diff(size as usize) < 2
}

/// Map unique horizontal/vertical line counts to a board size.
///
/// Tiers are tried in order and the first match wins; see [`SizeTier`].
/// Never fails: empty input ends in the default tier.
pub fn estimate_board_size(
    horizontal: usize,
    vertical: usize,
    catalog: &SizeCatalog,
) -> SizeEstimate {
    let estimate = |size: u32, tier: SizeTier| SizeEstimate {
        size,
        tier,
        horizontal_lines: horizontal,
        vertical_lines: vertical,
    };

    if let Some(&n) = catalog
        .sizes()
        .iter()
        .find(|&&n| near(horizontal, n) && near(vertical, n))
    {
        return estimate(n, SizeTier::ExactBoth);
    }

    if let Some(&n) = catalog
        .sizes()
        .iter()
        .find(|&&n| near(horizontal, n) || near(vertical, n))
    {
        return estimate(n, SizeTier::ExactOne);
    }

    let min = catalog.min_size() as usize;
    let best = match (horizontal > min, vertical > min) {
        (true, true) => Some(horizontal.min(vertical)),
        (true, false) => Some(horizontal),
        (false, true) => Some(vertical),
        (false, false) => None,
    };
    if let Some(size) = best.and_then(|s| u32::try_from(s).ok()) {
        return estimate(size, SizeTier::BestAvailable);
    }

    warn!(
        "cannot determine board size from {horizontal} horizontal / {vertical} vertical lines, \
         falling back to {}",
        catalog.default_size()
    );
    estimate(catalog.default_size(), SizeTier::Default)
}
