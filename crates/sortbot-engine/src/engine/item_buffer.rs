use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ItemLabel, ParseSeedError};

/// Supplies rubbish items from shuffled bags of all item labels.
///
/// Every run of [`ItemLabel::LEN`] consecutive bag draws contains each label
/// exactly once, so the player sees every kind of rubbish early.
///
/// # Example
///
/// ```
/// use sortbot_engine::ItemBuffer;
///
/// let mut buffer = ItemBuffer::new();
/// let first = buffer.pop_next();
/// let upcoming: Vec<_> = buffer.next_items().take(2).collect();
/// assert!(!upcoming.contains(&first));
/// ```
#[derive(Debug, Clone)]
pub struct ItemBuffer {
    rng: Pcg32,
    bag: VecDeque<ItemLabel>,
}

impl Default for ItemBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic sessions.
///
/// A 128-bit seed, written as 32 hex digits in JSON and on the command line.
/// The same seed reproduces the same item order and the same robot draws.
///
/// ```
/// use sortbot_engine::SessionSeed;
/// use rand::Rng as _;
///
/// let seed: SessionSeed = rand::rng().random();
/// let parsed: SessionSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSeed([u8; 16]);

impl SessionSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for SessionSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for SessionSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::InvalidLength(s.len()));
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSeedError::InvalidDigit(s.to_owned()));
        }
        let num =
            u128::from_str_radix(s, 16).map_err(|e| ParseSeedError::InvalidDigit(e.to_string()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for SessionSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SessionSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<SessionSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SessionSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SessionSeed(seed)
    }
}

impl ItemBuffer {
    /// Creates a buffer with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but deterministic for the given seed.
    #[must_use]
    pub fn with_seed(seed: SessionSeed) -> Self {
        Self::with_rng(Pcg32::from_seed(seed.0))
    }

    pub(crate) fn with_rng(rng: Pcg32) -> Self {
        let mut this = Self {
            rng,
            bag: VecDeque::with_capacity(ItemLabel::LEN * 2),
        };
        this.fill_bag();
        this
    }

    /// Tops the bag up with shuffled sets of all labels.
    ///
    /// After filling, at least `ItemLabel::LEN` items remain after the next pop.
    fn fill_bag(&mut self) {
        while self.bag.len() <= ItemLabel::LEN {
            let mut new_bag = ItemLabel::ALL;
            new_bag.shuffle(&mut self.rng);
            self.bag.extend(new_bag);
        }
    }

    /// Draws the next item.
    ///
    /// # Panics
    ///
    /// Panics if the bag is empty, which the refill prevents.
    pub fn pop_next(&mut self) -> ItemLabel {
        self.fill_bag();
        self.bag
            .pop_front()
            .expect("item bag should never be empty")
    }

    /// Returns the upcoming items without drawing them.
    pub fn next_items(&self) -> impl Iterator<Item = ItemLabel> + '_ {
        self.bag.iter().copied()
    }
}
