use std::path::{Path, PathBuf};

use anyhow::Context;
use statlab_data::{
    generator::{self, Generator, Preset},
    import,
    pattern::{self, Pattern},
};
use statlab_stats::sample::Dataset;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Distribution to draw x from: normal, uniform, binomial, poisson or exponential
    #[arg(long, conflicts_with_all = ["preset", "pattern"])]
    distribution: Option<String>,
    /// Distribution parameter as NAME=VALUE (mu, sigma, min, max, n, p, lambda)
    #[arg(long = "param", value_parser = util::parse_param)]
    params: Vec<(String, f64)>,
    /// Ready-made dataset: MeanDifference or MixedVariance
    #[arg(long, conflicts_with = "pattern")]
    preset: Option<Preset>,
    /// Free-text description of the sequence to synthesize
    #[arg(long)]
    pattern: Option<String>,
    /// Partial `{"data": [...]}` response to complete with the --pattern sequence
    #[arg(long, requires = "pattern")]
    complete: Option<PathBuf>,
    /// Number of points
    #[arg(long, default_value_t = 1000)]
    count: usize,
    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let GenerateArg {
        distribution,
        params,
        preset,
        pattern,
        complete,
        count,
        seed,
        output,
    } = arg;
    let mut rng = generator::rng_from_seed(*seed);
    if let Some(seed) = seed {
        eprintln!("Using seed {seed}");
    }

    let dataset = if let Some(preset) = preset {
        eprintln!("Generating preset {preset:?} ({} points)", Preset::POINT_COUNT);
        preset.generate(&mut rng)?
    } else if let Some(description) = pattern {
        let received = match complete {
            Some(path) => read_partial_sequence(path)?,
            None => Vec::new(),
        };
        eprintln!(
            "Synthesizing {} values with the {:?} pattern",
            count.saturating_sub(received.len()),
            Pattern::from_description(description)
        );
        Dataset::from_sequence(pattern::complete_sequence(
            &received,
            description,
            *count,
            &mut rng,
        ))
    } else {
        let name = distribution.as_deref().unwrap_or("normal");
        let generator = Generator::from_params(name, &util::param_map(params))?;
        eprintln!("Generating {count} points from {generator:?}");
        generator.generate(*count, &mut rng)?
    };

    Output::save_json(&dataset, output.as_deref())
}

fn read_partial_sequence(path: &Path) -> anyhow::Result<Vec<f64>> {
    let dataset = import::load_points(path)
        .with_context(|| format!("Failed to load partial sequence: {}", path.display()))?;
    eprintln!("Received {} values from {}", dataset.len(), path.display());
    Ok(dataset.points().iter().map(|p| p.y).collect())
}
