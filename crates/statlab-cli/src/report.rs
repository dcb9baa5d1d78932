use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use statlab_stats::sample::Dataset;

use crate::util::Output;

/// Envelope around every analysis result written by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct Report<T> {
    pub command: &'static str,
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<InputSummary>,
    pub result: T,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct InputSummary {
    pub points: usize,
    pub non_finite_points: usize,
}

impl InputSummary {
    pub fn of(dataset: &Dataset) -> Self {
        Self {
            points: dataset.len(),
            non_finite_points: dataset.non_finite_count(),
        }
    }
}

impl<T> Report<T>
where
    T: Serialize,
{
    pub fn new(command: &'static str, input: Option<InputSummary>, result: T) -> Self {
        Self {
            command,
            generated_at: Utc::now(),
            input,
            result,
        }
    }

    pub fn save(&self, output: Option<&Path>) -> anyhow::Result<()> {
        Output::save_json(self, output)
    }
}
