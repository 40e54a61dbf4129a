use anyhow::Context as _;
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use sortbot_engine::{BinLabel, DEFAULT_BIN_WEIGHTS, DecisionEngine, RandomBinPolicy};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SampleRandomArg {
    /// Number of bins to draw
    #[arg(long, default_value_t = 3000)]
    draws: usize,
    /// Seed of the random source
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Comma-separated weights for garbage, recycling and compost
    #[arg(long, value_delimiter = ',')]
    weights: Option<Vec<u32>>,
}

pub(crate) fn run(arg: &SampleRandomArg) -> anyhow::Result<()> {
    let SampleRandomArg {
        draws,
        seed,
        weights,
    } = arg;

    let engine = engine_with_weights(weights.as_deref())?;
    let mut rng = Pcg32::seed_from_u64(*seed);

    log::info!(
        "Drawing {draws} bins with weights {:?} (seed {seed})",
        engine.random_policy().weights()
    );
    let counts = sample_counts(&engine, *draws, &mut rng);

    println!("{:<10} {:>8} {:>10}", "bin", "count", "frequency");
    for bin in BinLabel::ALL {
        let name = bin.to_string();
        let count = counts[bin.index()];
        let freq = frequency(count, *draws);
        println!("{name:<10} {count:>8} {freq:>10.4}");
    }

    Ok(())
}

fn engine_with_weights(weights: Option<&[u32]>) -> anyhow::Result<DecisionEngine> {
    let weights: [u32; BinLabel::LEN] = match weights {
        Some(weights) => weights
            .try_into()
            .with_context(|| format!("Expected {} weights, got {}", BinLabel::LEN, weights.len()))?,
        None => DEFAULT_BIN_WEIGHTS,
    };
    let policy = RandomBinPolicy::with_weights(weights)?;
    Ok(DecisionEngine::with_random_policy(policy))
}

fn sample_counts<R>(engine: &DecisionEngine, draws: usize, rng: &mut R) -> [usize; BinLabel::LEN]
where
    R: Rng + ?Sized,
{
    let mut counts = [0; BinLabel::LEN];
    for _ in 0..draws {
        counts[engine.choose_random_bin(rng).index()] += 1;
    }
    counts
}

#[expect(clippy::cast_precision_loss)]
fn frequency(count: usize, draws: usize) -> f64 {
    if draws == 0 {
        return 0.0;
    }
    count as f64 / draws as f64
}

#[cfg(test)]
mod tests {
    use sortbot_engine::InvalidWeightsError;

    use super::*;

    #[test]
    fn test_default_weights_sample_uniformly() {
        let engine = engine_with_weights(None).unwrap();
        let mut rng = Pcg32::seed_from_u64(0);
        let counts = sample_counts(&engine, 3000, &mut rng);

        assert_eq!(counts.iter().sum::<usize>(), 3000);
        for count in counts {
            let freq = frequency(count, 3000);
            assert!((0.30..=0.37).contains(&freq), "counts: {counts:?}");
        }
    }

    #[test]
    fn test_same_seed_same_counts() {
        let engine = engine_with_weights(None).unwrap();
        let counts1 = sample_counts(&engine, 500, &mut Pcg32::seed_from_u64(5));
        let counts2 = sample_counts(&engine, 500, &mut Pcg32::seed_from_u64(5));
        assert_eq!(counts1, counts2);
    }

    #[test]
    fn test_zero_draws() {
        let engine = engine_with_weights(None).unwrap();
        let counts = sample_counts(&engine, 0, &mut Pcg32::seed_from_u64(0));
        assert_eq!(counts, [0; BinLabel::LEN]);
        assert!(frequency(0, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_custom_weights_skip_zero_bins() {
        let engine = engine_with_weights(Some(&[0, 0, 1][..])).unwrap();
        let counts = sample_counts(&engine, 100, &mut Pcg32::seed_from_u64(1));
        assert_eq!(counts, [0, 0, 100]);
    }

    #[test]
    fn test_wrong_weight_count_is_rejected() {
        let err = engine_with_weights(Some(&[3, 3][..])).unwrap_err();
        assert_eq!(err.to_string(), "Expected 3 weights, got 2");
        assert!(engine_with_weights(Some(&[1, 2, 3, 4][..])).is_err());
    }

    #[test]
    fn test_all_zero_weights_are_rejected() {
        let err = engine_with_weights(Some(&[0, 0, 0][..])).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InvalidWeightsError>(),
            Some(&InvalidWeightsError)
        );
    }
}
