use std::path::PathBuf;

use clap::{Parser, Subcommand};
use statlab_stats::sample::Dataset;

use self::{
    curve::CurveArg, describe::DescribeArg, estimate::EstimateArg, generate::GenerateArg,
    hypothesis_test::TestArg, interval::IntervalArg,
};
use crate::util;

mod curve;
mod describe;
mod estimate;
mod generate;
mod hypothesis_test;
mod interval;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What to compute
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Summarize both axes, their correlation and the trend line
    Describe(#[clap(flatten)] DescribeArg),
    /// Confidence intervals for both axes
    Interval(#[clap(flatten)] IntervalArg),
    /// MLE and method-of-moments parameter estimates
    Estimate(#[clap(flatten)] EstimateArg),
    /// One-sample t, z or chi-square test
    Test(#[clap(flatten)] TestArg),
    /// Density curve of a parametric distribution
    Curve(#[clap(flatten)] CurveArg),
    /// Generate a synthetic dataset
    Generate(#[clap(flatten)] GenerateArg),
}

/// Where the analyzed data comes from and where the report goes.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DataArg {
    /// Data file (JSON or CSV); read from stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl DataArg {
    fn read_dataset(&self) -> anyhow::Result<Dataset> {
        util::read_dataset(self.input.as_deref())
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Describe(arg) => describe::run(&arg)?,
        Mode::Interval(arg) => interval::run(&arg)?,
        Mode::Estimate(arg) => estimate::run(&arg)?,
        Mode::Test(arg) => hypothesis_test::run(&arg)?,
        Mode::Curve(arg) => curve::run(&arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_invalid_alpha_is_rejected() {
        assert!(CommandArgs::try_parse_from(["statlab", "test", "--alpha", "1.5"]).is_err());
    }

    #[test]
    fn test_generate_sources_conflict() {
        assert!(
            CommandArgs::try_parse_from([
                "statlab",
                "generate",
                "--distribution",
                "normal",
                "--pattern",
                "sine wave",
            ])
            .is_err()
        );
    }
}
