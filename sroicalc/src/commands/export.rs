use clap::ValueEnum;
use sroi_engine::{CsvOptions, SummaryOptions, io::Project};
use std::{io::Write, str::FromStr};

// This explicitly articulates the available renderings for the `export` subcommand
#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Summary,
}

// The knobs for every format, gathered from the configuration and the command line
#[derive(Clone, Debug, Default)]
pub struct ExportOptions {
    pub csv: CsvOptions,
    pub summary: SummaryOptions,
}

impl ExportFormat {
    pub fn export<W: Write>(
        &self,
        project: &Project,
        options: &ExportOptions,
        buffer: &mut W,
    ) -> anyhow::Result<()> {
        match self {
            Self::Csv => project.export_csv(&options.csv, buffer)?,
            Self::Summary => project.export_summary(&options.summary, buffer)?,
        };
        Ok(())
    }

    /// The file name for a project's export when no output is given,
    /// e.g. `SROI_<name>.csv` or `SROI_Summary_<name>.txt`
    pub fn file_name(&self, project: &str) -> String {
        // the name must not escape the directory it is written to
        let project = project
            .chars()
            .map(|c| match c {
                '/' | '\\' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect::<String>();

        match self {
            Self::Csv => format!("SROI_{project}.csv"),
            Self::Summary => format!("SROI_Summary_{project}.txt"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" | "CSV" => Ok(Self::Csv),
            "txt" | "TXT" => Ok(Self::Summary),
            _ => Err(Self::Err::ExportExtension(s.to_owned())),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ExportFormatError {
    #[error("Unknown export format: {0}")]
    ExportExtension(String),
}
