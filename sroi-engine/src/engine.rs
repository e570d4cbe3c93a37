use sroi_core::models::{
    OutcomeRecord, OutcomeValuation, ParameterError, ProjectParameters, Valuation,
};
use tracing::{Level, event};

/// Validate the raw project parameters, then value the records against them.
///
/// # Parameters
/// * `investment` - The total investment; a non-positive value yields a ratio of zero
/// * `discount_rate_percent` - The annual discount rate in percent, which must exceed -100
/// * `horizon_years` - The number of years to project, which must be at least one
/// * `records` - The outcomes to value; unlabelled records are skipped
///
/// # Errors
/// Returns `ParameterError` before any computation if the parameters are degenerate.
pub fn compute(
    investment: f64,
    discount_rate_percent: f64,
    horizon_years: u32,
    records: &[OutcomeRecord],
) -> Result<Valuation, ParameterError> {
    let parameters = ProjectParameters::new(investment, discount_rate_percent, horizon_years)?;
    Ok(evaluate(&parameters, records))
}

/// Value a set of outcome records against validated project parameters.
///
/// For every labelled record, the first-year net impact is carried across the
/// horizon, decaying by the record's drop-off from the second year onwards,
/// and each year's impact is discounted by `(1 + rate/100)^year`. The yearly
/// present values are accumulated both per record and per year.
///
/// The output preserves the order of the (labelled) input records, and the
/// per-year totals always have exactly `horizon_years` entries.
pub fn evaluate(parameters: &ProjectParameters, records: &[OutcomeRecord]) -> Valuation {
    let horizon = parameters.horizon_years() as usize;
    let rate = parameters.discount_rate();

    // Every record shares the same discount schedule, so we build it once.
    let factors = (1..=parameters.horizon_years())
        .map(|year| rate.factor(year))
        .collect::<Vec<_>>();

    let mut yearly_totals = vec![0.0; horizon];
    let mut outcomes = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        if !record.is_labelled() {
            event!(Level::DEBUG, index, "skipping unlabelled outcome");
            continue;
        }

        let net_impact = record.net_impact();
        let retention = record.drop_off.complement();

        let mut impact = net_impact;
        let mut yearly = Vec::with_capacity(horizon);
        for (offset, factor) in factors.iter().enumerate() {
            // year one is never decayed
            if offset > 0 {
                impact *= retention;
            }
            let present_value = impact / factor;
            yearly_totals[offset] += present_value;
            yearly.push(present_value);
        }

        outcomes.push(OutcomeValuation {
            label: record.label.clone(),
            net_impact,
            total_present_value: yearly.iter().sum(),
            yearly,
        });
    }

    let investment = parameters.investment();
    let total_present_value = yearly_totals.iter().sum::<f64>();
    let ratio = if investment > 0.0 {
        total_present_value / investment
    } else {
        0.0
    };

    event!(
        Level::DEBUG,
        outcomes = outcomes.len(),
        skipped = records.len() - outcomes.len(),
        total_present_value,
        ratio,
        "valuation complete"
    );

    Valuation {
        ratio,
        total_present_value,
        net_present_value: total_present_value - investment,
        investment,
        outcomes,
        yearly_totals,
    }
}
