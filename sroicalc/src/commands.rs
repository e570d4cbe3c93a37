use super::{IOArgs, OutputArgs};
use clap::Subcommand;

mod evaluate;
pub use evaluate::Evaluation;

mod export;
pub use export::{ExportFormat, ExportFormatError, ExportOptions};

#[derive(Subcommand)]
pub enum Commands {
    /// Value the project and report the full breakdown as JSON
    Evaluate {
        #[command(flatten)]
        io: IOArgs,
    },

    /// Value the project and export a table or summary report
    Export {
        #[command(flatten)]
        io: IOArgs,

        /// The file format to use (if omitted, will infer based on filename);
        /// without `-o`, the report is written beside the input as `SROI_<name>.<ext>`
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Restrict the summary report to ASCII characters
        #[arg(long)]
        ascii: bool,

        /// Omit the byte-order mark from CSV output
        #[arg(long)]
        no_bom: bool,
    },

    /// Print the JSON schema of the project file
    Schema {
        #[command(flatten)]
        output: OutputArgs,
    },
}
