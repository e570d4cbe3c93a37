use crate::{
    CsvOptions, OutcomeRecord, ParameterError, ProjectParameters, SummaryOptions, Valuation,
    export_csv, export_summary,
};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// The values used for anything a project file leaves unspecified
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectDefaults {
    /// The project name
    #[serde(default = "default_name")]
    pub name: String,
    /// The total investment
    #[serde(default = "default_investment")]
    pub investment: f64,
    /// The annual discount rate, in percent
    #[serde(default = "default_discount_rate_percent")]
    pub discount_rate_percent: f64,
    /// The number of years to project
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,
}

fn default_name() -> String {
    "SROI_Project_2026".to_owned()
}

fn default_investment() -> f64 {
    100000.0
}

fn default_discount_rate_percent() -> f64 {
    3.5
}

fn default_horizon_years() -> u32 {
    5
}

impl Default for ProjectDefaults {
    fn default() -> Self {
        Self {
            name: default_name(),
            investment: default_investment(),
            discount_rate_percent: default_discount_rate_percent(),
            horizon_years: default_horizon_years(),
        }
    }
}

/// A project file, as written by a user
///
/// Outcome records are validated as they are read; the project parameters
/// are validated by [`RawProject::prepare`], once the defaults are known.
/// Unknown keys are an error rather than being ignored.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct RawProject {
    /// The project name (optional)
    #[serde(default)]
    pub name: Option<String>,
    /// The total investment (optional)
    #[serde(default)]
    pub investment: Option<f64>,
    /// The annual discount rate, in percent (optional)
    #[serde(default)]
    pub discount_rate_percent: Option<f64>,
    /// The number of years to project (optional)
    #[serde(default)]
    pub horizon_years: Option<u32>,
    /// The claimed outcomes, in reporting order
    #[serde(default)]
    #[cfg_attr(feature = "schemars", schemars(with = "Vec<sroi_core::models::OutcomeRecordDto>"))]
    pub outcomes: Vec<OutcomeRecord>,
}

impl RawProject {
    /// Fill in any missing values and validate the project parameters
    pub fn prepare(self, defaults: &ProjectDefaults) -> Result<Project, ParameterError> {
        let parameters = ProjectParameters::new(
            self.investment.unwrap_or(defaults.investment),
            self.discount_rate_percent
                .unwrap_or(defaults.discount_rate_percent),
            self.horizon_years.unwrap_or(defaults.horizon_years),
        )?;

        Ok(Project {
            name: self.name.unwrap_or_else(|| defaults.name.clone()),
            parameters,
            outcomes: self.outcomes,
        })
    }
}

/// A validated project, ready for valuation
#[derive(Clone, Debug)]
pub struct Project {
    /// The project name
    pub name: String,
    /// The validated project parameters
    pub parameters: ProjectParameters,
    /// The claimed outcomes, in reporting order
    pub outcomes: Vec<OutcomeRecord>,
}

impl Project {
    /// value the project
    pub fn evaluate(&self) -> Valuation {
        crate::evaluate(&self.parameters, &self.outcomes)
    }

    /// export the valuation to CSV
    pub fn export_csv(
        &self,
        options: &CsvOptions,
        buffer: &mut impl Write,
    ) -> Result<(), std::io::Error> {
        export_csv(&self.evaluate(), options, buffer)
    }

    /// export a summary of the valuation
    pub fn export_summary(
        &self,
        options: &SummaryOptions,
        buffer: &mut impl Write,
    ) -> Result<(), std::io::Error> {
        export_summary(&self.name, &self.evaluate(), options, buffer)
    }
}
