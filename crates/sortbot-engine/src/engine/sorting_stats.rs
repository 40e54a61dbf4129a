use serde::{Deserialize, Serialize};

/// Disposal counters of a sorting session.
///
/// # Example
///
/// ```
/// use sortbot_engine::SortingStats;
///
/// let mut stats = SortingStats::new();
/// stats.record_robot_disposal();
/// stats.record_robot_miss();
///
/// assert_eq!(stats.robot_attempts(), 2);
/// assert_eq!(stats.robot_accuracy(), Some(0.5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingStats {
    player_disposals: usize,
    robot_disposals: usize,
    robot_misses: usize,
    returned_items: usize,
}

impl SortingStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            player_disposals: 0,
            robot_disposals: 0,
            robot_misses: 0,
            returned_items: 0,
        }
    }

    /// Items the player put into their own bin.
    #[must_use]
    pub const fn player_disposals(&self) -> usize {
        self.player_disposals
    }

    /// Items the robot put into their own bin.
    #[must_use]
    pub const fn robot_disposals(&self) -> usize {
        self.robot_disposals
    }

    /// Training-zone drops where the robot picked a wrong bin.
    #[must_use]
    pub const fn robot_misses(&self) -> usize {
        self.robot_misses
    }

    /// Player drops that missed every valid target.
    #[must_use]
    pub const fn returned_items(&self) -> usize {
        self.returned_items
    }

    #[must_use]
    pub const fn robot_attempts(&self) -> usize {
        self.robot_disposals + self.robot_misses
    }

    /// Share of robot attempts that hit the right bin, `None` before the first attempt.
    #[must_use]
    pub fn robot_accuracy(&self) -> Option<f64> {
        let attempts = self.robot_attempts();
        if attempts == 0 {
            return None;
        }
        #[expect(clippy::cast_precision_loss)]
        let accuracy = self.robot_disposals as f64 / attempts as f64;
        Some(accuracy)
    }

    pub const fn record_player_disposal(&mut self) {
        self.player_disposals += 1;
    }

    pub const fn record_robot_disposal(&mut self) {
        self.robot_disposals += 1;
    }

    pub const fn record_robot_miss(&mut self) {
        self.robot_misses += 1;
    }

    pub const fn record_returned_item(&mut self) {
        self.returned_items += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        let stats = SortingStats::new();
        assert_eq!(stats, SortingStats::default());
        assert_eq!(stats.robot_attempts(), 0);
        assert_eq!(stats.robot_accuracy(), None);
    }

    #[test]
    fn test_counters_are_independent() {
        let mut stats = SortingStats::new();
        stats.record_player_disposal();
        stats.record_player_disposal();
        stats.record_returned_item();
        stats.record_robot_disposal();

        assert_eq!(stats.player_disposals(), 2);
        assert_eq!(stats.returned_items(), 1);
        assert_eq!(stats.robot_disposals(), 1);
        assert_eq!(stats.robot_misses(), 0);
        assert_eq!(stats.robot_accuracy(), Some(1.0));
    }
}
