use serde::Serialize;
use statlab_stats::{
    descriptive::BivariateSummary,
    histogram::Histogram,
    regression::{self, TrendLine},
    sample::Axis,
};

use super::DataArg;
use crate::report::{InputSummary, Report};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DescribeArg {
    #[clap(flatten)]
    data: DataArg,
}

#[derive(Debug, Clone, Serialize)]
struct Description {
    summary: BivariateSummary,
    trend_line: Option<TrendLine>,
    /// Distribution of the x coordinates.
    histogram: Histogram,
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let DescribeArg { data } = arg;
    let dataset = data.read_dataset()?;
    let (x, y) = dataset.paired();

    let summary = BivariateSummary::new(&x, &y)?;
    eprintln!(
        "n = {}, r = {:.4} ({:?})",
        summary.x.count, summary.correlation, summary.correlation_strength
    );
    let trend_line = regression::fit_line(&x, &y);
    if trend_line.is_none() {
        eprintln!("No trend line: x has no spread");
    }
    let histogram = Histogram::from_sorted(&dataset.axis(Axis::X).sorted())?;
    eprintln!("Histogram of x: {} bins", histogram.bins.len());

    Report::new(
        "describe",
        Some(InputSummary::of(&dataset)),
        Description {
            summary,
            trend_line,
            histogram,
        },
    )
    .save(data.output.as_deref())
}
