use statlab_stats::interval::{AxisIntervals, ConfidenceLevel, CriticalValueMethod, IntervalTarget};

use super::DataArg;
use crate::report::{InputSummary, Report};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct IntervalArg {
    #[clap(flatten)]
    data: DataArg,
    /// Confidence level; 0.90, 0.95 and 0.99 use table critical values
    #[arg(long, default_value_t = 0.95)]
    level: f64,
    /// What to estimate: mean or proportion of non-zero values
    #[arg(long, default_value = "mean")]
    target: IntervalTarget,
    /// Critical value distribution for the mean: z or t
    #[arg(long, default_value = "z")]
    method: CriticalValueMethod,
}

pub(crate) fn run(arg: &IntervalArg) -> anyhow::Result<()> {
    let IntervalArg {
        data,
        level,
        target,
        method,
    } = arg;
    let confidence = ConfidenceLevel::new(*level);
    if !(*level > 0.0 && *level < 1.0) {
        eprintln!(
            "Confidence level {level} is outside (0, 1), using {}",
            confidence.value()
        );
    }

    let dataset = data.read_dataset()?;
    let intervals = AxisIntervals::compute(&dataset, *target, confidence, *method)?;
    for (name, axis) in [("x", &intervals.x), ("y", &intervals.y)] {
        let ci = &axis.interval;
        eprintln!(
            "{name}: n = {}, mean = {:.4}, [{:.4}, {:.4}] at {:.0}%",
            axis.count,
            axis.mean,
            ci.lower,
            ci.upper,
            ci.level.value() * 100.0
        );
    }

    Report::new("interval", Some(InputSummary::of(&dataset)), intervals)
        .save(data.output.as_deref())
}
