use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{BinLabel, Example, ItemLabel};

use super::{DecisionEngine, EngineState, ItemBuffer, SessionSeed, SortingStats};

/// Where the player released the dragged item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum DropTarget {
    /// Fully inside a bin.
    Bin(BinLabel),
    /// Inside the training zone; the robot sorts the item.
    TrainingZone,
    /// Anywhere else.
    Elsewhere,
}

/// Which policy the robot used for a training-zone drop.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum RobotPolicy {
    Random,
    Learned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotMove {
    pub policy: RobotPolicy,
    pub bin: BinLabel,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum DropOutcome {
    /// The item went into its bin and the next item was loaded.
    Disposed { bin: BinLabel },
    /// The item went back to the start.
    Returned,
}

/// Result of one [`SortingSession::drop_item`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropReport {
    pub item: ItemLabel,
    pub target: DropTarget,
    /// Set only for training-zone drops.
    pub robot: Option<RobotMove>,
    pub outcome: DropOutcome,
}

impl DropReport {
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.outcome.is_disposed()
    }
}

/// One play session: the current item, the item supply and the robot's engine.
///
/// The session performs the host's disposal check. Only an item placed in its
/// canonical bin is disposed; player disposals become training examples, robot
/// disposals do not.
#[derive(Debug, Clone)]
pub struct SortingSession {
    engine: DecisionEngine,
    items: ItemBuffer,
    rng: Pcg32,
    current_item: ItemLabel,
    stats: SortingStats,
}

impl Default for SortingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SortingSession {
    /// Creates a session with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Creates a deterministic session: item order and robot draws depend only on `seed`
    /// and the drops made.
    #[must_use]
    pub fn with_seed(seed: SessionSeed) -> Self {
        Self::with_engine(seed, DecisionEngine::new())
    }

    /// Like [`Self::with_seed`], but with a caller-provided engine.
    #[must_use]
    pub fn with_engine(seed: SessionSeed, engine: DecisionEngine) -> Self {
        let mut rng = Pcg32::from_seed(seed.to_bytes());
        let mut items = ItemBuffer::with_rng(Pcg32::from_rng(&mut rng));
        let current_item = items.pop_next();
        Self {
            engine,
            items,
            rng,
            current_item,
            stats: SortingStats::new(),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    #[must_use]
    pub fn stats(&self) -> &SortingStats {
        &self.stats
    }

    /// The item currently waiting to be sorted.
    #[must_use]
    pub fn current_item(&self) -> ItemLabel {
        self.current_item
    }

    pub fn next_items(&self) -> impl Iterator<Item = ItemLabel> + '_ {
        self.items.next_items()
    }

    /// Whether the training zone should be shown as active.
    #[must_use]
    pub fn training_zone_enabled(&self) -> bool {
        self.engine.is_training_complete()
    }

    /// Handles the player releasing the current item over `target`.
    pub fn drop_item(&mut self, target: DropTarget) -> DropReport {
        let item = self.current_item;
        let (robot, outcome) = match target {
            DropTarget::Bin(bin) if self.check_disposal(bin) => {
                let example = Example::new(item, bin);
                debug_assert!(example.is_canonical());
                self.engine.record_example(example.item, example.bin);
                self.stats.record_player_disposal();
                self.load_next_item();
                (None, DropOutcome::Disposed { bin })
            }
            DropTarget::Bin(_) | DropTarget::Elsewhere => {
                self.stats.record_returned_item();
                (None, DropOutcome::Returned)
            }
            DropTarget::TrainingZone => {
                let robot = self.choose_robot_move(item);
                let outcome = if self.check_disposal(robot.bin) {
                    self.stats.record_robot_disposal();
                    self.load_next_item();
                    DropOutcome::Disposed { bin: robot.bin }
                } else {
                    self.stats.record_robot_miss();
                    DropOutcome::Returned
                };
                (Some(robot), outcome)
            }
        };
        log::debug!("dropped {item} on {target:?}: {outcome:?}");
        DropReport {
            item,
            target,
            robot,
            outcome,
        }
    }

    fn check_disposal(&self, bin: BinLabel) -> bool {
        self.current_item.canonical_bin() == bin
    }

    fn choose_robot_move(&mut self, item: ItemLabel) -> RobotMove {
        match self.engine.state() {
            EngineState::Trained => {
                let bin = self
                    .engine
                    .choose_learned_bin(item)
                    .expect("trained engine always has a learned bin");
                RobotMove {
                    policy: RobotPolicy::Learned,
                    bin,
                }
            }
            EngineState::Untrained => {
                log::debug!("training incomplete; robot chooses a random bin");
                RobotMove {
                    policy: RobotPolicy::Random,
                    bin: self.engine.choose_random_bin(&mut self.rng),
                }
            }
        }
    }

    fn load_next_item(&mut self) {
        self.current_item = self.items.pop_next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SortingSession {
        SortingSession::with_seed(SessionSeed::from_bytes([0x5a; 16]))
    }

    fn train(session: &mut SortingSession) {
        while !session.training_zone_enabled() {
            let item = session.current_item();
            session.drop_item(DropTarget::Bin(item.canonical_bin()));
        }
    }

    #[test]
    fn test_correct_bin_records_example_and_loads_next() {
        let mut session = session();
        let item = session.current_item();
        let next = session.next_items().next().unwrap();

        let report = session.drop_item(DropTarget::Bin(item.canonical_bin()));

        assert_eq!(
            report.outcome,
            DropOutcome::Disposed {
                bin: item.canonical_bin()
            }
        );
        assert_eq!(report.robot, None);
        assert_eq!(session.engine().len(), 1);
        assert_eq!(session.engine().examples()[0].item, item);
        assert_eq!(session.current_item(), next);
        assert_eq!(session.stats().player_disposals(), 1);
    }

    #[test]
    fn test_wrong_bin_returns_item() {
        let mut session = session();
        let item = session.current_item();
        let wrong = BinLabel::ALL
            .into_iter()
            .find(|bin| *bin != item.canonical_bin())
            .unwrap();

        let report = session.drop_item(DropTarget::Bin(wrong));

        assert!(report.outcome.is_returned());
        assert!(session.engine().is_empty());
        assert_eq!(session.current_item(), item);
        assert_eq!(session.stats().returned_items(), 1);
    }

    #[test]
    fn test_drop_elsewhere_returns_item() {
        let mut session = session();
        let item = session.current_item();
        let report = session.drop_item(DropTarget::Elsewhere);
        assert!(report.outcome.is_returned());
        assert_eq!(session.current_item(), item);
    }

    #[test]
    fn test_untrained_robot_uses_random_policy() {
        let mut session = session();
        for _ in 0..20 {
            let report = session.drop_item(DropTarget::TrainingZone);
            let robot = report.robot.unwrap();
            assert!(robot.policy.is_random());
            assert_eq!(report.is_disposed(), robot.bin == report.item.canonical_bin());
        }
        assert!(session.engine().is_empty());
        assert_eq!(session.stats().robot_attempts(), 20);
    }

    #[test]
    fn test_trained_robot_uses_learned_policy() {
        let mut session = session();
        train(&mut session);
        let examples = session.engine().len();

        for _ in 0..10 {
            let report = session.drop_item(DropTarget::TrainingZone);
            let robot = report.robot.unwrap();
            assert!(robot.policy.is_learned());
            assert!(report.is_disposed());
        }
        assert_eq!(session.engine().len(), examples);
        assert_eq!(session.stats().robot_accuracy(), Some(1.0));
    }

    #[test]
    fn test_robot_policy_follows_engine_state() {
        let mut session = session();
        for _ in 0..200 {
            let trained = session.engine().state().is_trained();
            let item = session.current_item();
            let report = session.drop_item(DropTarget::TrainingZone);
            assert_eq!(report.robot.unwrap().policy.is_learned(), trained);
            if report.outcome.is_returned() {
                session.drop_item(DropTarget::Bin(item.canonical_bin()));
            }
        }
        assert!(session.engine().state().is_trained());
        assert!(session.engine().examples().iter().all(Example::is_canonical));
    }

    #[test]
    fn test_learned_engine_with_wrong_examples_misses() {
        let mut engine = DecisionEngine::new();
        for item in ItemLabel::ALL {
            engine.record_example(item, BinLabel::Garbage);
        }
        let mut session = SortingSession::with_engine(SessionSeed::from_bytes([1; 16]), engine);

        for _ in 0..9 {
            let report = session.drop_item(DropTarget::TrainingZone);
            assert_eq!(report.robot.unwrap().bin, BinLabel::Garbage);
            assert_eq!(report.is_disposed(), report.item == ItemLabel::Black);
        }
    }

    #[test]
    fn test_same_seed_same_reports() {
        let targets = [
            DropTarget::TrainingZone,
            DropTarget::Elsewhere,
            DropTarget::TrainingZone,
            DropTarget::Bin(BinLabel::Compost),
            DropTarget::TrainingZone,
        ];
        let mut session1 = session();
        let mut session2 = session();
        for target in targets {
            assert_eq!(session1.drop_item(target), session2.drop_item(target));
        }
    }

    #[test]
    fn test_drop_report_serialization() {
        let report = DropReport {
            item: ItemLabel::Blue,
            target: DropTarget::TrainingZone,
            robot: Some(RobotMove {
                policy: RobotPolicy::Random,
                bin: BinLabel::Compost,
            }),
            outcome: DropOutcome::Returned,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"item":"blue","target":"training-zone","robot":{"policy":"random","bin":"compost"},"outcome":"returned"}"#
        );
        let parsed: DropReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
