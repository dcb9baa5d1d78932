use statlab_stats::{
    estimation::{self, EstimationFamily},
    sample::Axis,
};

use super::DataArg;
use crate::report::{InputSummary, Report};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EstimateArg {
    #[clap(flatten)]
    data: DataArg,
    /// Distribution family: normal, exponential or poisson
    #[arg(long)]
    distribution: EstimationFamily,
    /// Axis to analyze
    #[arg(long, default_value = "y")]
    axis: Axis,
}

pub(crate) fn run(arg: &EstimateArg) -> anyhow::Result<()> {
    let EstimateArg {
        data,
        distribution,
        axis,
    } = arg;
    let dataset = data.read_dataset()?;
    let sample = dataset.axis(*axis);

    let result = estimation::estimate(*distribution, sample.as_slice())?;
    eprintln!("MLE: {:?}", result.mle_params);
    eprintln!("MoM: {:?}", result.mom_params);

    Report::new("estimate", Some(InputSummary::of(&dataset)), result).save(data.output.as_deref())
}
