use serde::{Deserialize, Serialize};

use super::label::{BinLabel, ItemLabel};

/// One observed player disposal: `item` was put into `bin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub item: ItemLabel,
    pub bin: BinLabel,
}

impl Example {
    #[must_use]
    pub const fn new(item: ItemLabel, bin: BinLabel) -> Self {
        Self { item, bin }
    }

    /// Returns `true` if the example follows the canonical sorting rule.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.item.canonical_bin() == self.bin
    }
}
