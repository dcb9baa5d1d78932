use statlab_stats::{
    hypothesis::{
        self, HypothesisTestConfig, Reference, SignificanceLevel, TestDirection, TestFamily,
    },
    sample::Axis,
};

use super::DataArg;
use crate::report::{InputSummary, Report};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TestArg {
    #[clap(flatten)]
    data: DataArg,
    /// Test family: t, z or chi-square
    #[arg(long, default_value = "t")]
    family: TestFamily,
    /// Alternative hypothesis: two-tailed, left-tailed or right-tailed
    #[arg(long, default_value = "two-tailed")]
    direction: TestDirection,
    /// Hypothesized mean, or variance for the chi-square test
    #[arg(long = "null", default_value_t = 0.0, allow_negative_numbers = true)]
    null_value: f64,
    /// Reference distribution for the t statistic: student-t or normal
    #[arg(long, default_value = "student-t")]
    reference: Reference,
    /// Significance level, strictly between 0 and 1
    #[arg(long, default_value = "0.05")]
    alpha: SignificanceLevel,
    /// Axis to analyze
    #[arg(long, default_value = "y")]
    axis: Axis,
}

pub(crate) fn run(arg: &TestArg) -> anyhow::Result<()> {
    let TestArg {
        data,
        family,
        direction,
        null_value,
        reference,
        alpha,
        axis,
    } = arg;
    let config = HypothesisTestConfig {
        family: *family,
        direction: *direction,
        null_value: *null_value,
        significance: *alpha,
        reference: *reference,
    };
    let dataset = data.read_dataset()?;
    let sample = dataset.axis(*axis);

    let result = hypothesis::run_test(sample.as_slice(), &config)?;
    eprintln!(
        "statistic = {:.4}, p = {:.4}: {} the null hypothesis at alpha = {}",
        result.statistic,
        result.p_value,
        if result.reject_null {
            "reject"
        } else {
            "fail to reject"
        },
        result.significance_level
    );

    Report::new("test", Some(InputSummary::of(&dataset)), result).save(data.output.as_deref())
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;
    use crate::command::{CommandArgs, Mode};

    #[test]
    fn test_parse_arguments() {
        let args = CommandArgs::try_parse_from([
            "statlab",
            "test",
            "--family",
            "chi-square",
            "--direction",
            "right-tailed",
            "--null",
            "4",
            "--alpha",
            "0.01",
            "--axis",
            "x",
        ])
        .unwrap();
        let Mode::Test(arg) = args.mode else {
            panic!("expected the test subcommand");
        };
        assert_eq!(arg.family, TestFamily::ChiSquare);
        assert_eq!(arg.direction, TestDirection::RightTailed);
        assert_eq!(arg.null_value, 4.0);
        assert_eq!(arg.alpha.value(), 0.01);
        assert_eq!(arg.axis, Axis::X);
    }

    #[test]
    fn test_normal_reference() {
        let args =
            CommandArgs::try_parse_from(["statlab", "test", "--reference", "normal"]).unwrap();
        let Mode::Test(arg) = args.mode else {
            panic!("expected the test subcommand");
        };
        assert_eq!(arg.reference, Reference::Normal);
        assert_eq!(arg.family, TestFamily::T);
    }

    #[test]
    fn test_defaults() {
        let args = CommandArgs::try_parse_from(["statlab", "test", "--null", "-2.5"]).unwrap();
        let Mode::Test(arg) = args.mode else {
            panic!("expected the test subcommand");
        };
        assert_eq!(arg.family, TestFamily::T);
        assert_eq!(arg.direction, TestDirection::TwoTailed);
        assert_eq!(arg.null_value, -2.5);
        assert_eq!(arg.alpha.value(), 0.05);
        assert_eq!(arg.axis, Axis::Y);
        assert_eq!(arg.reference, Reference::StudentT);
    }
}
