use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufWriter, Read as _, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use statlab_data::import;
use statlab_stats::sample::Dataset;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)?;
        if let Output::File { path, .. } = &output {
            eprintln!("Wrote {}", path.display());
        }
        Ok(())
    }

    pub fn from_output_path(output_path: Option<&Path>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::create(path),
            None => Ok(Output::Stdout {
                writer: io::stdout().lock(),
            }),
        }
    }

    fn create(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path: path.to_owned(),
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self)
            .with_context(|| format!("Failed to terminate JSON in {}", self.display_path()))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Reads a dataset from a JSON or CSV file, or from stdin when no path is given.
pub fn read_dataset(input: Option<&Path>) -> anyhow::Result<Dataset> {
    let (dataset, source) = match input {
        Some(path) => {
            let dataset = import::load_points(path)
                .with_context(|| format!("Failed to load data file: {}", path.display()))?;
            (dataset, path.display().to_string())
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read data from stdin")?;
            let dataset = import::parse_points(&text).context("Failed to parse data from stdin")?;
            (dataset, "stdin".to_owned())
        }
    };
    eprintln!("Loaded {} data points from {source}", dataset.len());
    let non_finite = dataset.non_finite_count();
    if non_finite > 0 {
        eprintln!("  {non_finite} points have non-finite coordinates and are ignored");
    }
    Ok(dataset)
}

/// Parses a `NAME=VALUE` distribution parameter.
pub fn parse_param(s: &str) -> anyhow::Result<(String, f64)> {
    let (name, value) = s
        .split_once('=')
        .with_context(|| format!("Expected NAME=VALUE, got '{s}'"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid number in parameter '{s}'"))?;
    Ok((name.trim().to_owned(), value))
}

pub fn param_map(params: &[(String, f64)]) -> BTreeMap<String, f64> {
    params.iter().cloned().collect()
}
