use clap::Args;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write, stdin, stdout},
    path::{Path, PathBuf},
    str::FromStr,
};

// A project file to read, and somewhere to put the result
#[derive(Args)]
pub struct IOArgs {
    /// The project JSON file ("-" reads from stdin)
    #[arg(value_parser = clap::value_parser!(PathOrStd))]
    input: PathOrStd,

    #[command(flatten)]
    output: OutputArgs,
}

impl IOArgs {
    pub fn read(&self) -> anyhow::Result<Box<dyn Read>> {
        match &self.input {
            PathOrStd::Path(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
            PathOrStd::Std => Ok(Box::new(stdin().lock())),
        }
    }

    pub fn write(&self) -> anyhow::Result<Box<dyn Write>> {
        self.output.write()
    }

    pub fn extension(&self) -> Option<&str> {
        self.output.extension()
    }

    /// Whether `-o` was given at all
    pub fn has_output(&self) -> bool {
        self.output.output.is_some()
    }

    /// The path of `file_name` in the project file's directory, or in the
    /// working directory when the project came from stdin
    pub fn beside_input(&self, file_name: &str) -> PathBuf {
        match &self.input {
            PathOrStd::Path(path) => path.with_file_name(file_name),
            PathOrStd::Std => PathBuf::from(file_name),
        }
    }
}

// The destination of a report; stdout unless a file is named
#[derive(Args)]
pub struct OutputArgs {
    /// The output file (omitted or "-" writes to stdout)
    #[arg(short, long, value_parser = clap::value_parser!(PathOrStd))]
    output: Option<PathOrStd>,
}

impl OutputArgs {
    pub fn write(&self) -> anyhow::Result<Box<dyn Write>> {
        match &self.output {
            Some(PathOrStd::Path(path)) => create(path),
            Some(PathOrStd::Std) | None => Ok(Box::new(stdout().lock())),
        }
    }

    pub fn extension(&self) -> Option<&str> {
        match &self.output {
            Some(PathOrStd::Path(path)) => path.extension().and_then(|ext| ext.to_str()),
            _ => None,
        }
    }
}

/// Create (or truncate) a file for buffered writing
pub fn create(path: &Path) -> anyhow::Result<Box<dyn Write>> {
    Ok(Box::new(BufWriter::new(File::create(path)?)))
}

#[derive(Clone)]
enum PathOrStd {
    Path(PathBuf),
    Std,
}

impl FromStr for PathOrStd {
    type Err = <PathBuf as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" => Ok(Self::Std),
            _ => Ok(Self::Path(s.parse()?)),
        }
    }
}
