use rand::Rng;

use crate::{BinLabel, Example, ItemLabel, NotReadyError};

use super::bin_policy::{LearnedBinPolicy, RandomBinPolicy};

/// Training state of a [`DecisionEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum EngineState {
    /// At least one item label has no example yet.
    Untrained,
    /// Every item label has at least one example.
    Trained,
}

/// Learns bin choices from the player's disposals.
///
/// The engine owns an insertion-ordered, append-only sequence of [`Example`]s.
/// It answers two queries:
///
/// - [`Self::choose_random_bin`] - the untrained baseline, independent of any example
/// - [`Self::choose_learned_bin`] - the learned choice, available once every
///   item label has an example
///
/// The engine holds no lock; share it across threads only behind a mutex.
///
/// # Example
///
/// ```
/// use sortbot_engine::{BinLabel, DecisionEngine, ItemLabel};
///
/// let mut engine = DecisionEngine::new();
/// engine.record_example(ItemLabel::Black, BinLabel::Garbage);
/// assert!(engine.choose_learned_bin(ItemLabel::Black).is_err());
///
/// engine.record_example(ItemLabel::Blue, BinLabel::Recycling);
/// engine.record_example(ItemLabel::Green, BinLabel::Compost);
/// assert!(engine.is_training_complete());
/// assert_eq!(engine.choose_learned_bin(ItemLabel::Blue), Ok(BinLabel::Recycling));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    examples: Vec<Example>,
    random_policy: RandomBinPolicy,
}

impl DecisionEngine {
    /// Creates an engine with no examples and the default random policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_random_policy(RandomBinPolicy::new())
    }

    /// Creates an engine with no examples and a custom random policy.
    #[must_use]
    pub fn with_random_policy(random_policy: RandomBinPolicy) -> Self {
        Self {
            examples: Vec::new(),
            random_policy,
        }
    }

    #[must_use]
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    #[must_use]
    pub fn random_policy(&self) -> &RandomBinPolicy {
        &self.random_policy
    }

    /// Appends one observed disposal.
    pub fn record_example(&mut self, item: ItemLabel, bin: BinLabel) {
        log::trace!("recording example #{}: {item} -> {bin}", self.examples.len());
        self.examples.push(Example::new(item, bin));
    }

    /// Returns `true` once every item label has at least one example.
    ///
    /// Examples are never removed, so this never reverts to `false`.
    #[must_use]
    pub fn is_training_complete(&self) -> bool {
        self.first_missing_item().is_none()
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        if self.is_training_complete() {
            EngineState::Trained
        } else {
            EngineState::Untrained
        }
    }

    /// Draws a bin from the random policy, ignoring recorded examples.
    pub fn choose_random_bin<R>(&self, rng: &mut R) -> BinLabel
    where
        R: Rng + ?Sized,
    {
        self.random_policy.choose_bin(rng)
    }

    /// Rebuilds the learned decision procedure from all recorded examples.
    pub fn learned_policy(&self) -> Result<LearnedBinPolicy, NotReadyError> {
        LearnedBinPolicy::from_examples(&self.examples)
    }

    /// Returns the bin of the first recorded example for `item`.
    ///
    /// Fails with [`NotReadyError`] until [`Self::is_training_complete`] holds.
    pub fn choose_learned_bin(&self, item: ItemLabel) -> Result<BinLabel, NotReadyError> {
        let policy = self.learned_policy()?;
        log::debug!("learned decision procedure:\n{policy}");
        Ok(policy.choose_bin(item))
    }

    fn first_missing_item(&self) -> Option<ItemLabel> {
        let mut seen = [false; ItemLabel::LEN];
        for example in &self.examples {
            seen[example.item.index()] = true;
        }
        ItemLabel::ALL.into_iter().find(|item| !seen[item.index()])
    }
}
