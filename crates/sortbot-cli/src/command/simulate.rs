use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use rand::{Rng, SeedableRng as _, seq::IndexedRandom as _};
use rand_distr::{Bernoulli, Distribution as _};
use rand_pcg::Pcg32;
use sortbot_engine::{BinLabel, DropTarget, ItemLabel, SessionSeed, SortingSession};

use crate::{
    schema::record::{PlayerProfile, RecordedSession, TurnRecord},
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of drops to simulate
    #[arg(long, default_value_t = 30)]
    rounds: usize,
    /// Probability that a direct drop hits the right bin
    #[arg(long, default_value_t = 0.8)]
    accuracy: f64,
    /// Probability of dropping the item on the training zone
    #[arg(long, default_value_t = 0.25)]
    training_rate: f64,
    /// Session seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<SessionSeed>,
    /// Seed of the simulated player's decisions (random if omitted)
    #[arg(long)]
    player_seed: Option<u64>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Chooses drop targets the way an imperfect player would.
struct SimulatedPlayer {
    accuracy: Bernoulli,
    training: Bernoulli,
}

impl SimulatedPlayer {
    fn new(profile: PlayerProfile) -> anyhow::Result<Self> {
        let accuracy = Bernoulli::new(profile.accuracy)
            .with_context(|| format!("Invalid accuracy: {}", profile.accuracy))?;
        let training = Bernoulli::new(profile.training_rate)
            .with_context(|| format!("Invalid training rate: {}", profile.training_rate))?;
        Ok(Self { accuracy, training })
    }

    fn choose_target<R>(&self, item: ItemLabel, rng: &mut R) -> DropTarget
    where
        R: Rng + ?Sized,
    {
        if self.training.sample(rng) {
            return DropTarget::TrainingZone;
        }
        let correct = item.canonical_bin();
        if self.accuracy.sample(rng) {
            return DropTarget::Bin(correct);
        }
        let mut wrong = BinLabel::ALL
            .into_iter()
            .filter(|bin| *bin != correct)
            .map(DropTarget::Bin)
            .collect::<Vec<_>>();
        wrong.push(DropTarget::Elsewhere);
        *wrong
            .choose(rng)
            .expect("there is always at least one wrong target")
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        rounds,
        accuracy,
        training_rate,
        seed,
        player_seed,
        output,
    } = arg;

    let profile = PlayerProfile {
        accuracy: *accuracy,
        training_rate: *training_rate,
    };
    let player = SimulatedPlayer::new(profile)?;
    let mut player_rng = match player_seed {
        Some(seed) => Pcg32::seed_from_u64(*seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    };

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let record = simulate_session(&player, profile, seed, *rounds, &mut player_rng);
    util::save_json(&record, output.as_deref())?;
    if let Some(path) = output {
        log::info!("Session saved to {}", path.display());
    }

    Ok(())
}

fn simulate_session<R>(
    player: &SimulatedPlayer,
    profile: PlayerProfile,
    seed: SessionSeed,
    rounds: usize,
    player_rng: &mut R,
) -> RecordedSession
where
    R: Rng + ?Sized,
{
    let mut session = SortingSession::with_seed(seed);
    log::info!("Simulating {rounds} drops (seed {seed})");

    let mut turns = Vec::with_capacity(rounds);
    for turn in 0..rounds {
        let was_trained = session.training_zone_enabled();
        let target = player.choose_target(session.current_item(), player_rng);
        let report = session.drop_item(target);
        if !was_trained && session.training_zone_enabled() {
            log::info!("Training complete after turn {turn}, training zone enabled");
        }
        turns.push(TurnRecord { turn, report });
    }

    let stats = session.stats().clone();
    log::info!(
        "Player disposals: {}, returned: {}",
        stats.player_disposals(),
        stats.returned_items()
    );
    match stats.robot_accuracy() {
        Some(robot_accuracy) => log::info!(
            "Robot disposals: {}/{} ({:.1}%)",
            stats.robot_disposals(),
            stats.robot_attempts(),
            robot_accuracy * 100.0
        ),
        None => log::info!("Robot was never used"),
    }
    if let Ok(policy) = session.engine().learned_policy() {
        log::info!("Learned decision procedure:\n{policy}");
    }

    RecordedSession {
        recorded_at: Utc::now(),
        seed,
        player: profile,
        final_stats: stats,
        examples: session.engine().examples().to_vec(),
        turns,
    }
}
