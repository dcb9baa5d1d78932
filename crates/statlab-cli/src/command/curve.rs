use std::path::PathBuf;

use statlab_stats::distribution::DistributionModel;

use crate::{report::Report, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CurveArg {
    /// Distribution: normal, binomial or poisson
    #[arg(long, default_value = "normal")]
    distribution: String,
    /// Distribution parameter as NAME=VALUE (mu, sigma, n, p, lambda)
    #[arg(long = "param", value_parser = util::parse_param)]
    params: Vec<(String, f64)>,
    /// Start of the plotted range (continuous distributions)
    #[arg(long, default_value_t = -5.0, allow_negative_numbers = true)]
    from: f64,
    /// End of the plotted range (continuous distributions)
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    to: f64,
    /// Number of points, or the largest k for discrete distributions
    #[arg(long, default_value_t = 101)]
    points: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CurveArg) -> anyhow::Result<()> {
    let CurveArg {
        distribution,
        params,
        from,
        to,
        points,
        output,
    } = arg;
    let model = DistributionModel::from_params(distribution, &util::param_map(params))?;
    let curve = model.curve((*from, *to), *points)?;
    eprintln!(
        "{} points, mean = {:.4}, variance = {:.4}",
        curve.points.len(),
        model.mean(),
        model.variance()
    );

    Report::new("curve", None, curve).save(output.as_deref())
}
