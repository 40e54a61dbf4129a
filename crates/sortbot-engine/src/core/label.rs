use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};

/// Category of a rubbish item.
///
/// Each item label has exactly one canonical disposal bin, see
/// [`ItemLabel::canonical_bin`].
///
/// # Example
///
/// ```
/// use sortbot_engine::{BinLabel, ItemLabel};
///
/// assert_eq!(ItemLabel::Blue.canonical_bin(), BinLabel::Recycling);
/// assert_eq!("green".parse::<ItemLabel>().unwrap(), ItemLabel::Green);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum ItemLabel {
    /// Black rubbish, goes to the garbage.
    #[display("black")]
    Black = 0,
    /// Blue rubbish, goes to the recycling.
    #[display("blue")]
    Blue = 1,
    /// Green rubbish, goes to the compost.
    #[display("green")]
    Green = 2,
}

impl Distribution<ItemLabel> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ItemLabel {
        match rng.random_range(0..ItemLabel::LEN) {
            0 => ItemLabel::Black,
            1 => ItemLabel::Blue,
            _ => ItemLabel::Green,
        }
    }
}

impl ItemLabel {
    /// Number of item labels (3).
    pub const LEN: usize = 3;

    /// All item labels, in declaration order.
    pub const ALL: [Self; Self::LEN] = [Self::Black, Self::Blue, Self::Green];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the bin this item belongs in.
    #[must_use]
    pub const fn canonical_bin(self) -> BinLabel {
        match self {
            Self::Black => BinLabel::Garbage,
            Self::Blue => BinLabel::Recycling,
            Self::Green => BinLabel::Compost,
        }
    }

    /// Returns the sprite node name the host scene uses for this item.
    ///
    /// ```
    /// use sortbot_engine::ItemLabel;
    ///
    /// assert_eq!(ItemLabel::Black.node_name(), "BlackRubbishItem");
    /// assert_eq!(ItemLabel::from_node_name("BlueRubbishItem"), Some(ItemLabel::Blue));
    /// assert_eq!(ItemLabel::from_node_name("RedRubbishItem"), None);
    /// ```
    #[must_use]
    pub const fn node_name(self) -> &'static str {
        match self {
            Self::Black => "BlackRubbishItem",
            Self::Blue => "BlueRubbishItem",
            Self::Green => "GreenRubbishItem",
        }
    }

    /// Parses a host node name back into an item label.
    #[must_use]
    pub fn from_node_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.node_name() == name)
    }
}

/// A disposal destination.
///
/// The training zone is a drop target of the host, not a bin, and therefore has
/// no variant here.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum BinLabel {
    #[display("garbage")]
    Garbage = 0,
    #[display("recycling")]
    Recycling = 1,
    #[display("compost")]
    Compost = 2,
}

impl BinLabel {
    /// Number of bins (3).
    pub const LEN: usize = 3;

    /// All bins, in declaration order.
    pub const ALL: [Self; Self::LEN] = [Self::Garbage, Self::Recycling, Self::Compost];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the node name the host scene uses for this bin.
    ///
    /// ```
    /// use sortbot_engine::BinLabel;
    ///
    /// assert_eq!(BinLabel::Recycling.node_name(), "recycling bin");
    /// assert_eq!(BinLabel::from_node_name("compost bin"), Some(BinLabel::Compost));
    /// assert_eq!(BinLabel::from_node_name("learned bin"), None);
    /// ```
    #[must_use]
    pub const fn node_name(self) -> &'static str {
        match self {
            Self::Garbage => "garbage bin",
            Self::Recycling => "recycling bin",
            Self::Compost => "compost bin",
        }
    }

    /// Parses a host node name back into a bin label.
    #[must_use]
    pub fn from_node_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bin| bin.node_name() == name)
    }
}
