use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sortbot_engine::{DropReport, Example, SessionSeed, SortingStats};

/// Recorded sorting session for replay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedSession {
    /// Timestamp when recording was created (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Seed of the item order and the robot's random draws
    pub seed: SessionSeed,
    /// Parameters of the simulated player
    pub player: PlayerProfile,
    /// Counters at the end of the session
    pub final_stats: SortingStats,
    /// Training examples learned during the session, in recording order
    pub examples: Vec<Example>,
    /// Every drop, in order
    pub turns: Vec<TurnRecord>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Probability of choosing the right bin on a direct drop
    pub accuracy: f64,
    /// Probability of handing the item to the robot
    pub training_rate: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Turn number (0-indexed)
    pub turn: usize,
    pub report: DropReport,
}
