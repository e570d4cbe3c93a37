use clap::Parser;
use sroi_engine::io::{Project, RawProject};
use std::{io::Write as _, path::PathBuf};
use tracing::{Level, event};

mod io;
pub use io::*;

mod commands;
pub use commands::*;

mod config;
pub use config::{AppConfig, Limits, ReportConfig};

// The top-level arguments -- the configuration file and the subcommand to execute
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "SROI_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn execute(self) -> anyhow::Result<()> {
        let config = AppConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Evaluate { io } => {
                let project = load(&io, &config)?;
                let evaluation = Evaluation::new(&project);
                let mut output = io.write()?;
                serde_json::to_writer_pretty(&mut output, &evaluation)?;
                writeln!(output)?;
                output.flush()?;
            }
            Commands::Export {
                io,
                format,
                ascii,
                no_bom,
            } => {
                let project = load(&io, &config)?;

                let format = if let Some(format) = format {
                    format
                } else if let Some(ext) = io.extension() {
                    ext.parse()?
                } else {
                    return Err(CliError::ExportInference)?;
                };

                let options = config.export_options(ascii, no_bom);
                let mut output = if io.has_output() {
                    io.write()?
                } else {
                    // an explicit format without a destination names the file after the project
                    let path = io.beside_input(&format.file_name(&project.name));
                    event!(Level::INFO, path = %path.display(), "writing export");
                    create(&path)?
                };
                format.export(&project, &options, &mut output)?;
                output.flush()?;
            }
            Commands::Schema { output } => {
                let schema = schemars::schema_for!(RawProject);
                let mut output = output.write()?;
                serde_json::to_writer_pretty(&mut output, &schema)?;
                writeln!(output)?;
                output.flush()?;
            }
        }

        Ok(())
    }
}

// Read a project file, fill in the configured defaults and enforce the configured limits
fn load(io: &IOArgs, config: &AppConfig) -> anyhow::Result<Project> {
    let input = io.read()?;
    let project = serde_json::from_reader::<_, RawProject>(input)?.prepare(&config.defaults)?;
    config.limits.check(&project)?;

    event!(
        Level::INFO,
        project = %project.name,
        outcomes = project.outcomes.len(),
        horizon_years = project.parameters.horizon_years(),
        "loaded project"
    );

    let investment = project.parameters.investment();
    if investment <= 0.0 {
        event!(
            Level::WARN,
            investment,
            "investment is not positive, the SROI ratio will be reported as 0"
        );
    }

    Ok(project)
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Unable to infer export format, please specify a valid format")]
    ExportInference,
    #[error("{count} outcomes exceeds the limit of {max}")]
    TooManyOutcomes { count: usize, max: usize },
    #[error("a horizon of {years} years exceeds the limit of {max}")]
    HorizonTooLong { years: u32, max: u32 },
}
