use std::{
    fs::File,
    io::{self, BufReader, BufWriter, StdoutLock},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use packdrop_protocol::{JudgeReader, ProtocolError};

/// Destination of a CSV report: a file when a path is given, stdout
/// otherwise.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    /// Writes `record` as a header line plus one data row.
    pub fn save_csv<T>(record: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match output_path {
            Some(path) => Output::create(path)?,
            None => Output::Stdout(io::stdout().lock()),
        };
        output.write_csv(record)
    }

    fn create(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    fn display_path(&self) -> String {
        match self {
            Output::Stdout(_) => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    fn write_csv<T>(&mut self, record: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let result = match self {
            Output::Stdout(writer) => write_csv_record(writer, record),
            Output::File { writer, .. } => write_csv_record(writer, record),
        };
        result.with_context(|| format!("Failed to write CSV to {}", self.display_path()))
    }
}

pub fn write_csv_record<W, T>(writer: W, record: &T) -> Result<(), csv::Error>
where
    W: io::Write,
    T: serde::Serialize,
{
    let mut writer = csv::Writer::from_writer(writer);
    writer.serialize(record)?;
    writer.flush()?;
    Ok(())
}

/// Opens a recorded judge stream and parses it with `read`.
pub fn read_judge_file<T, F>(file_kind: &str, path: &Path, read: F) -> anyhow::Result<T>
where
    F: FnOnce(&mut JudgeReader<BufReader<File>>) -> Result<T, ProtocolError>,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    let mut reader = JudgeReader::new(BufReader::new(file));
    read(&mut reader)
        .with_context(|| format!("Failed to parse {file_kind} file: {}", path.display()))
}
