//! Even split of a fixed stock quantity across a product's combinations.

use crate::error::EngineError;

/// Stock allocation for one product: every combination gets `floor(T / n)`,
/// and the first `T mod n` combinations (in generation order) get one more,
/// so the quantities always sum to exactly `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryPlan {
    base: u32,
    remainder: usize,
}

impl InventoryPlan {
    /// Plans the split of `total` units over `combinations` rows.
    ///
    /// When there are more combinations than units the first `total` rows get
    /// one unit each and the rest get zero.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoCombinations`] when `combinations` is zero.
    pub fn new(code: &str, total: u32, combinations: usize) -> Result<Self, EngineError> {
        if combinations == 0 {
            return Err(EngineError::NoCombinations {
                code: code.to_string(),
            });
        }

        let total_units = total as usize;
        if combinations > total_units {
            tracing::warn!(
                code,
                combinations,
                total_stock = total,
                "more combinations than stock units; trailing variants get zero"
            );
        }

        // base <= total, so it always fits back into u32.
        let base = u32::try_from(total_units / combinations).unwrap_or(total);
        let remainder = total_units % combinations;

        Ok(Self { base, remainder })
    }

    /// Quantity for the combination at 0-based `index`.
    #[must_use]
    pub fn quantity_at(&self, index: usize) -> u32 {
        if index < self.remainder {
            self.base + 1
        } else {
            self.base
        }
    }
}
