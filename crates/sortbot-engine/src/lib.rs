//! Decision core of the rubbish-sorting game.
//!
//! The player drags rubbish items into bins; every correct player disposal is
//! recorded as a training [`Example`]. Items dropped into the training zone are
//! sorted by the robot, which picks a bin at random until the
//! [`DecisionEngine`] has seen every item label, and from the learned decision
//! procedure afterwards.
//!
//! - [`core`] - Closed label types and the recorded [`Example`] pair
//! - [`engine`] - [`DecisionEngine`], bin policies, item generation and the
//!   [`SortingSession`] that plays the host's disposal check

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Returned when a learned bin is requested before every item label has an example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("training incomplete: no example recorded for {missing}")]
pub struct NotReadyError {
    /// The first item label (in [`ItemLabel::ALL`] order) with no recorded example.
    pub missing: ItemLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("bin weights must not all be zero")]
pub struct InvalidWeightsError;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid hex: expected 32 characters, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid hex: {_0}")]
    InvalidDigit(#[error(not(source))] String),
}
