use std::fmt;

use rand::{
    Rng,
    distr::{Distribution as _, weighted::WeightedIndex},
};

use crate::{BinLabel, Example, InvalidWeightsError, ItemLabel, NotReadyError};

/// Weights of the untrained robot, indexed by [`BinLabel::index`].
pub const DEFAULT_BIN_WEIGHTS: [u32; BinLabel::LEN] = [3, 3, 3];

/// Picks a bin from a fixed weighted distribution, ignoring the item.
///
/// # Example
///
/// ```
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
/// use sortbot_engine::{BinLabel, RandomBinPolicy};
///
/// let policy = RandomBinPolicy::new();
/// let mut rng = Pcg32::seed_from_u64(42);
/// let bin = policy.choose_bin(&mut rng);
/// assert!(BinLabel::ALL.contains(&bin));
/// ```
#[derive(Debug, Clone)]
pub struct RandomBinPolicy {
    weights: [u32; BinLabel::LEN],
    distribution: WeightedIndex<u32>,
}

impl Default for RandomBinPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomBinPolicy {
    /// Creates the uniform policy using [`DEFAULT_BIN_WEIGHTS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_weights(DEFAULT_BIN_WEIGHTS).expect("default bin weights are positive")
    }

    /// Creates a policy with custom per-bin weights.
    ///
    /// A zero weight disables a bin; at least one weight must be positive.
    pub fn with_weights(weights: [u32; BinLabel::LEN]) -> Result<Self, InvalidWeightsError> {
        let distribution = WeightedIndex::new(weights).map_err(|_| InvalidWeightsError)?;
        Ok(Self {
            weights,
            distribution,
        })
    }

    #[must_use]
    pub fn weights(&self) -> &[u32; BinLabel::LEN] {
        &self.weights
    }

    /// Draws a bin. Every call is an independent draw.
    pub fn choose_bin<R>(&self, rng: &mut R) -> BinLabel
    where
        R: Rng + ?Sized,
    {
        BinLabel::ALL[self.distribution.sample(rng)]
    }
}

/// Decision procedure learned from recorded examples.
///
/// The procedure asks a single question (the item's label, see
/// [`Self::ATTRIBUTE`]) and answers with the bin of the first example recorded
/// for that label. Later conflicting examples never override an earlier one.
///
/// # Example
///
/// ```
/// use sortbot_engine::{BinLabel, Example, ItemLabel, LearnedBinPolicy};
///
/// let examples = [
///     Example::new(ItemLabel::Black, BinLabel::Garbage),
///     Example::new(ItemLabel::Black, BinLabel::Recycling),
///     Example::new(ItemLabel::Blue, BinLabel::Recycling),
///     Example::new(ItemLabel::Green, BinLabel::Compost),
/// ];
/// let policy = LearnedBinPolicy::from_examples(&examples).unwrap();
/// assert_eq!(policy.choose_bin(ItemLabel::Black), BinLabel::Garbage);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnedBinPolicy {
    table: [BinLabel; ItemLabel::LEN],
}

impl LearnedBinPolicy {
    /// Name of the only attribute the procedure branches on.
    pub const ATTRIBUTE: &'static str = "NodeColor";

    /// Builds the procedure from examples in recording order.
    ///
    /// Fails with [`NotReadyError`] unless every item label has at least one example.
    pub fn from_examples(examples: &[Example]) -> Result<Self, NotReadyError> {
        let mut table = [None; ItemLabel::LEN];
        for example in examples {
            table[example.item.index()].get_or_insert(example.bin);
        }

        let mut resolved = [BinLabel::Garbage; ItemLabel::LEN];
        for item in ItemLabel::ALL {
            resolved[item.index()] = table[item.index()].ok_or(NotReadyError { missing: item })?;
        }
        Ok(Self { table: resolved })
    }

    #[must_use]
    pub fn choose_bin(&self, item: ItemLabel) -> BinLabel {
        self.table[item.index()]
    }
}

impl fmt::Display for LearnedBinPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}?", Self::ATTRIBUTE)?;
        for item in ItemLabel::ALL {
            writeln!(f, "  {item} -> {}", self.choose_bin(item).node_name())?;
        }
        Ok(())
    }
}
