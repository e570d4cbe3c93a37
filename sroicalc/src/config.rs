//! Application configuration management.
//!
//! Configuration is loaded and merged from multiple sources with a clear
//! precedence order: default values, an optional configuration file, and
//! environment variables.

use crate::{CliError, ExportOptions};
use serde::{Deserialize, Serialize};
use sroi_engine::{
    Charset, CsvOptions, SummaryOptions,
    io::{Project, ProjectDefaults},
};
use std::path::Path;

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Values for anything a project file leaves unspecified
    #[serde(default)]
    pub defaults: ProjectDefaults,

    /// Bounds on the size of a project
    #[serde(default)]
    pub limits: Limits,

    /// Presentation of exported reports
    #[serde(default)]
    pub report: ReportConfig,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `SROI_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Discount at 5% unless the project file says otherwise
    /// export SROI_DEFAULTS__DISCOUNT_RATE_PERCENT=5
    ///
    /// # Allow projects with up to 15 outcomes
    /// export SROI_LIMITS__MAX_OUTCOMES=15
    ///
    /// # Report amounts in US dollars
    /// export SROI_REPORT__CURRENCY=USD
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = path {
            if path.exists() {
                config = config.add_source(config::File::from(path))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // Override with environment variables
        // This maps SROI_LIMITS__MAX_OUTCOMES to limits.max_outcomes
        config = config.add_source(
            config::Environment::with_prefix("SROI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }

    /// Combine the report configuration with the per-invocation flags
    pub fn export_options(&self, ascii: bool, no_bom: bool) -> ExportOptions {
        let charset = if ascii {
            Charset::Ascii
        } else {
            Charset::Unicode
        };

        ExportOptions {
            csv: CsvOptions { bom: !no_bom },
            summary: SummaryOptions {
                currency: self.report.currency.clone(),
                precision: self.report.precision,
                charset,
            },
        }
    }
}

/// Bounds on the size of a project
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Limits {
    /// The most outcome records a project may contain (labelled or not)
    #[serde(default = "default_max_outcomes")]
    pub max_outcomes: usize,

    /// The longest horizon a project may project over
    #[serde(default = "default_max_horizon_years")]
    pub max_horizon_years: u32,
}

fn default_max_outcomes() -> usize {
    10
}

fn default_max_horizon_years() -> u32 {
    10
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_outcomes: default_max_outcomes(),
            max_horizon_years: default_max_horizon_years(),
        }
    }
}

impl Limits {
    /// Reject projects that exceed these bounds
    pub fn check(&self, project: &Project) -> Result<(), CliError> {
        let count = project.outcomes.len();
        if count > self.max_outcomes {
            return Err(CliError::TooManyOutcomes {
                count,
                max: self.max_outcomes,
            });
        }

        let years = project.parameters.horizon_years();
        if years > self.max_horizon_years {
            return Err(CliError::HorizonTooLong {
                years,
                max: self.max_horizon_years,
            });
        }

        Ok(())
    }
}

/// Presentation settings for summary reports
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// The currency suffix written after each amount
    #[serde(default = "default_currency")]
    pub currency: String,

    /// The number of decimal places for amounts
    #[serde(default = "default_precision")]
    pub precision: usize,
}

fn default_currency() -> String {
    "THB".to_owned()
}

fn default_precision() -> usize {
    2
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            precision: default_precision(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults_without_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.defaults, ProjectDefaults::default());
        assert_eq!(config.limits.max_outcomes, 10);
        assert_eq!(config.limits.max_horizon_years, 10);
        assert_eq!(config.report.currency, "THB");
        assert_eq!(config.report.precision, 2);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[defaults]
discount_rate_percent = 6.0

[limits]
max_outcomes = 15

[report]
currency = "USD"
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.defaults.discount_rate_percent, 6.0);
        assert_eq!(config.defaults.horizon_years, 5);
        assert_eq!(config.limits.max_outcomes, 15);
        assert_eq!(config.limits.max_horizon_years, 10);
        assert_eq!(config.report.currency, "USD");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/sroicalc.toml"))).is_err());
    }

    #[test]
    fn export_flags() {
        let options = AppConfig::default().export_options(true, true);
        assert!(!options.csv.bom);
        assert_eq!(options.summary.charset, Charset::Ascii);

        let options = AppConfig::default().export_options(false, false);
        assert!(options.csv.bom);
        assert_eq!(options.summary.charset, Charset::Unicode);
        assert_eq!(options.summary.currency, "THB");
    }
}
