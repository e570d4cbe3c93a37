use approx::assert_relative_eq;
use rstest::*;
use sroi_engine::{
    Valuation,
    io::{ProjectDefaults, RawProject},
};
use std::{fs::File, io::BufReader, path::PathBuf};

// For every (input.json, output.json) pair in `./samples/**`,
//   1. Read in the project file,
//   2. Read in the known-good valuation,
//   3. Value the project, filling any gaps from the default settings,
//   4. Compare the valuation to the known-good output.
// The comparison requires the ordering of outcomes to be preserved, and checks
// every number with a relative tolerance.

#[rstest]
fn run_project(#[files("tests/samples/**/input.json")] input: PathBuf) {
    let mut output = input.clone();
    output.set_file_name("output.json");

    let project: RawProject =
        serde_json::from_reader(BufReader::new(File::open(input).unwrap())).unwrap();

    let reference: Valuation =
        serde_json::from_reader(BufReader::new(File::open(output).unwrap())).unwrap();

    let valuation = project
        .prepare(&ProjectDefaults::default())
        .unwrap()
        .evaluate();

    cmp(&valuation, &reference, 1e-9);
}

fn cmp(a: &Valuation, b: &Valuation, eps: f64) {
    assert_relative_eq!(a.ratio, b.ratio, epsilon = eps, max_relative = eps);
    assert_relative_eq!(
        a.total_present_value,
        b.total_present_value,
        epsilon = eps,
        max_relative = eps
    );
    assert_relative_eq!(
        a.net_present_value,
        b.net_present_value,
        epsilon = eps,
        max_relative = eps
    );
    assert_eq!(a.investment, b.investment);

    assert_eq!(a.yearly_totals.len(), b.yearly_totals.len());
    for (x, y) in a.yearly_totals.iter().zip(b.yearly_totals.iter()) {
        assert_relative_eq!(*x, *y, epsilon = eps, max_relative = eps);
    }

    assert_eq!(a.outcomes.len(), b.outcomes.len());
    for (o1, o2) in a.outcomes.iter().zip(b.outcomes.iter()) {
        assert_eq!(o1.label, o2.label);
        assert_relative_eq!(o1.net_impact, o2.net_impact, epsilon = eps, max_relative = eps);
        assert_relative_eq!(
            o1.total_present_value,
            o2.total_present_value,
            epsilon = eps,
            max_relative = eps
        );
        assert_eq!(o1.yearly.len(), o2.yearly.len());
        for (x, y) in o1.yearly.iter().zip(o2.yearly.iter()) {
            assert_relative_eq!(*x, *y, epsilon = eps, max_relative = eps);
        }
    }
}
