use approx::assert_relative_eq;
use clap::Parser as _;
use rstest::*;
use sroicalc::{BaseArgs, CliError};
use std::{fs, path::Path};
use tempfile::TempDir;

const EMPLOYMENT: &str = r#"{
    "name": "Employment pilot",
    "investment": 100000,
    "discount_rate_percent": 3.5,
    "horizon_years": 3,
    "outcomes": [
        {
            "label": "Employment",
            "proxy_value": 50000,
            "quantity": 2,
            "deadweight": 0.1,
            "displacement": { "percent": 10 },
            "attribution": 0.1,
            "drop_off": 0.1
        },
        { "label": "", "proxy_value": 0, "quantity": 0 }
    ]
}"#;

#[fixture]
fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("project.json"), EMPLOYMENT).unwrap();
    dir
}

fn run(dir: &Path, args: &[&str]) -> anyhow::Result<()> {
    let input = dir.join("project.json");
    let args = std::iter::once("sroicalc").chain(args.iter().map(|arg| {
        if *arg == "INPUT" {
            input.to_str().unwrap()
        } else {
            *arg
        }
    }));
    BaseArgs::try_parse_from(args)?.execute()
}

#[rstest]
fn evaluate_writes_json(workspace: TempDir) {
    let output = workspace.path().join("valuation.json");
    run(
        workspace.path(),
        &["evaluate", "INPUT", "-o", output.to_str().unwrap()],
    )
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
    assert_eq!(value["name"], "Employment pilot");
    assert_relative_eq!(
        value["ratio"].as_f64().unwrap(),
        1.8494123448672644,
        max_relative = 1e-9
    );
    assert_eq!(value["outcomes"].as_array().unwrap().len(), 1);
    assert_eq!(value["yearly_totals"].as_array().unwrap().len(), 3);
}

#[rstest]
fn export_infers_csv(workspace: TempDir) {
    let output = workspace.path().join("table.csv");
    run(
        workspace.path(),
        &["export", "INPUT", "-o", output.to_str().unwrap()],
    )
    .unwrap();

    let table = fs::read_to_string(output).unwrap();
    assert!(table.starts_with("\u{feff}Stakeholder/Outcome,"));
    let lines = table.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Employment,"));
    assert!(lines[2].starts_with("TOTAL PV PER YEAR,"));
}

#[rstest]
fn export_summary_in_ascii(workspace: TempDir) {
    let output = workspace.path().join("summary.txt");
    run(
        workspace.path(),
        &["export", "INPUT", "-o", output.to_str().unwrap(), "--ascii"],
    )
    .unwrap();

    let summary = fs::read_to_string(output).unwrap();
    assert!(summary.is_ascii());
    assert!(summary.contains("SROI Ratio: 1.85"));
    assert!(summary.contains("Total Investment: 100,000.00 THB"));
}

#[rstest]
fn explicit_format_wins(workspace: TempDir) {
    let output = workspace.path().join("report.out");
    run(
        workspace.path(),
        &[
            "export",
            "INPUT",
            "-o",
            output.to_str().unwrap(),
            "-f",
            "csv",
            "--no-bom",
        ],
    )
    .unwrap();

    let table = fs::read_to_string(output).unwrap();
    assert!(table.starts_with("Stakeholder/Outcome,"));
}

#[rstest]
fn export_requires_a_format(workspace: TempDir) {
    let output = workspace.path().join("report");
    let err = run(
        workspace.path(),
        &["export", "INPUT", "-o", output.to_str().unwrap()],
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CliError>(),
        Some(CliError::ExportInference)
    ));
}

#[rstest]
fn export_is_named_after_the_project(workspace: TempDir) {
    run(workspace.path(), &["export", "INPUT", "-f", "csv"]).unwrap();
    run(workspace.path(), &["export", "INPUT", "-f", "summary"]).unwrap();

    let table = fs::read_to_string(workspace.path().join("SROI_Employment pilot.csv")).unwrap();
    assert!(table.starts_with("\u{feff}Stakeholder/Outcome,"));

    let summary =
        fs::read_to_string(workspace.path().join("SROI_Summary_Employment pilot.txt")).unwrap();
    assert!(summary.contains("Project: Employment pilot"));
}

#[rstest]
fn misspelled_keys_are_rejected(workspace: TempDir) {
    let input = workspace.path().join("project.json");
    fs::write(
        &input,
        r#"{ "investment": 1000, "outcomes": [{ "label": "x", "proxy_value": 1, "quantity": 1, "dead_weight": 0.9 }] }"#,
    )
    .unwrap();

    let err = run(workspace.path(), &["evaluate", "INPUT"]).unwrap_err();
    assert!(err.to_string().contains("dead_weight"));
}

#[rstest]
fn config_file_sets_limits_and_currency(workspace: TempDir) {
    let config = workspace.path().join("sroicalc.toml");
    fs::write(
        &config,
        "[limits]\nmax_outcomes = 1\n\n[report]\ncurrency = \"USD\"\n",
    )
    .unwrap();

    // the unlabelled row still counts towards the limit
    let output = workspace.path().join("summary.txt");
    let err = run(
        workspace.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "export",
            "INPUT",
            "-o",
            output.to_str().unwrap(),
        ],
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CliError>(),
        Some(CliError::TooManyOutcomes { count: 2, max: 1 })
    ));

    fs::write(&config, "[report]\ncurrency = \"USD\"\nprecision = 0\n").unwrap();
    run(
        workspace.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "export",
            "INPUT",
            "-o",
            output.to_str().unwrap(),
        ],
    )
    .unwrap();
    let summary = fs::read_to_string(output).unwrap();
    assert!(summary.contains("Total PV (TPV): 184,941 USD"));
}

#[rstest]
fn horizon_limit(workspace: TempDir) {
    let input = workspace.path().join("project.json");
    fs::write(&input, r#"{ "investment": 1000, "horizon_years": 25 }"#).unwrap();

    let err = run(workspace.path(), &["evaluate", "INPUT"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CliError>(),
        Some(CliError::HorizonTooLong { years: 25, max: 10 })
    ));
}

#[rstest]
fn invalid_parameters_are_reported(workspace: TempDir) {
    let input = workspace.path().join("project.json");
    fs::write(
        &input,
        r#"{ "investment": 1000, "discount_rate_percent": -100 }"#,
    )
    .unwrap();

    let err = run(workspace.path(), &["evaluate", "INPUT"]).unwrap_err();
    assert!(err.to_string().contains("-100"));
}

#[rstest]
fn schema_describes_project_files(workspace: TempDir) {
    let output = workspace.path().join("schema.json");
    run(
        workspace.path(),
        &["schema", "-o", output.to_str().unwrap()],
    )
    .unwrap();

    let schema = fs::read_to_string(output).unwrap();
    assert!(schema.contains("\"investment\""));
    assert!(schema.contains("\"outcomes\""));
    assert!(schema.contains("\"percent\""));
}
