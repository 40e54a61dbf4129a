use std::path::PathBuf;

use anyhow::{bail, ensure};
use sortbot_engine::SortingSession;

use crate::{schema::record::RecordedSession, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Path to the recorded session (JSON format)
    record_path: PathBuf,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg { record_path } = arg;

    let record: RecordedSession = util::read_json_file("session record", record_path)?;
    log::info!(
        "Replaying {} turns recorded at {} (seed {})",
        record.turns.len(),
        record.recorded_at,
        record.seed
    );
    verify(&record)?;
    log::info!("Replay matches the recording");
    Ok(())
}

pub(crate) fn verify(record: &RecordedSession) -> anyhow::Result<()> {
    let mut session = SortingSession::with_seed(record.seed);
    for turn in &record.turns {
        let expected = &turn.report;
        let item = session.current_item();
        ensure!(
            item == expected.item,
            "turn {}: expected item {}, session has {item}",
            turn.turn,
            expected.item
        );
        let report = session.drop_item(expected.target);
        if report != *expected {
            bail!(
                "turn {}: recorded {expected:?}, replayed {report:?}",
                turn.turn
            );
        }
    }

    ensure!(
        session.stats() == &record.final_stats,
        "final stats differ: recorded {:?}, replayed {:?}",
        record.final_stats,
        session.stats()
    );
    ensure!(
        session.engine().examples() == record.examples.as_slice(),
        "learned examples differ"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sortbot_engine::{BinLabel, DropTarget, ItemLabel, SessionSeed};

    use super::*;
    use crate::schema::record::{PlayerProfile, TurnRecord};

    fn record_session(targets: &[DropTarget]) -> RecordedSession {
        let seed = SessionSeed::from_bytes([9; 16]);
        let mut session = SortingSession::with_seed(seed);
        let turns = targets
            .iter()
            .enumerate()
            .map(|(turn, target)| TurnRecord {
                turn,
                report: session.drop_item(*target),
            })
            .collect();
        RecordedSession {
            recorded_at: Utc::now(),
            seed,
            player: PlayerProfile {
                accuracy: 1.0,
                training_rate: 0.5,
            },
            final_stats: session.stats().clone(),
            examples: session.engine().examples().to_vec(),
            turns,
        }
    }

    const TARGETS: [DropTarget; 6] = [
        DropTarget::TrainingZone,
        DropTarget::Bin(BinLabel::Garbage),
        DropTarget::Bin(BinLabel::Recycling),
        DropTarget::Bin(BinLabel::Compost),
        DropTarget::Elsewhere,
        DropTarget::TrainingZone,
    ];

    #[test]
    fn test_verify_accepts_faithful_record() {
        let record = record_session(&TARGETS);
        verify(&record).unwrap();
    }

    #[test]
    fn test_verify_survives_json_roundtrip() {
        let record = record_session(&TARGETS);
        let json = serde_json::to_string(&record).unwrap();
        let parsed: RecordedSession = serde_json::from_str(&json).unwrap();
        verify(&parsed).unwrap();
    }

    #[test]
    fn test_verify_rejects_tampered_stats() {
        let mut record = record_session(&TARGETS);
        record.final_stats.record_player_disposal();
        assert!(verify(&record).is_err());
    }

    #[test]
    fn test_verify_rejects_tampered_item() {
        let mut record = record_session(&TARGETS);
        let item = record.turns[0].report.item;
        record.turns[0].report.item = ItemLabel::ALL
            .into_iter()
            .find(|other| *other != item)
            .unwrap();
        assert!(verify(&record).is_err());
    }
}
