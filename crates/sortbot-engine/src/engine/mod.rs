//! Decision logic and host-side session management.
//!
//! - [`DecisionEngine`] - Accumulated training examples and the two bin queries
//! - [`RandomBinPolicy`] / [`LearnedBinPolicy`] - The untrained and trained policies
//! - [`ItemBuffer`] - Shuffled-bag item generation
//! - [`SessionSeed`] - Seed for deterministic sessions
//! - [`SortingSession`] - The host's drag-and-drop flow around one engine
//! - [`SortingStats`] - Disposal counters
//!
//! # Session Flow
//!
//! 1. A [`SortingSession`] loads the first rubbish item
//! 2. The player drops the item onto a [`DropTarget`]
//! 3. A drop into the item's own bin is recorded as an [`Example`](crate::Example)
//!    and the next item is loaded
//! 4. A drop into the training zone lets the robot choose a bin; the choice is
//!    random until every item label has an example, learned afterwards
//! 5. Anything else returns the item to the start
//!
//! # Example
//!
//! ```
//! use sortbot_engine::{DropTarget, SessionSeed, SortingSession};
//!
//! let seed: SessionSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
//! let mut session = SortingSession::with_seed(seed);
//!
//! while !session.training_zone_enabled() {
//!     let item = session.current_item();
//!     session.drop_item(DropTarget::Bin(item.canonical_bin()));
//! }
//!
//! let report = session.drop_item(DropTarget::TrainingZone);
//! assert!(report.is_disposed());
//! ```

pub use self::{
    bin_policy::*, decision_engine::*, item_buffer::*, sorting_session::*, sorting_stats::*,
};

mod bin_policy;
mod decision_engine;
mod item_buffer;
mod sorting_session;
mod sorting_stats;
