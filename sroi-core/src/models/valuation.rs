/// The result of valuing a set of outcomes against a project's parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Valuation {
    /// Total present value per unit of investment, or zero if the investment is not positive
    pub ratio: f64,
    /// The sum of all discounted value, across every outcome and year
    pub total_present_value: f64,
    /// Total present value less the investment
    pub net_present_value: f64,
    /// The investment the ratio was computed against
    pub investment: f64,
    /// The breakdown for every labelled outcome, in input order
    pub outcomes: Vec<OutcomeValuation>,
    /// The present value of each year, summed across outcomes
    pub yearly_totals: Vec<f64>,
}

impl Valuation {
    /// The number of years covered by this valuation
    pub fn horizon_years(&self) -> usize {
        self.yearly_totals.len()
    }
}

/// The valuation of a single outcome.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomeValuation {
    /// The label of the originating outcome record
    pub label: String,
    /// The first-year impact, before discounting
    pub net_impact: f64,
    /// The sum of this outcome's yearly present values
    pub total_present_value: f64,
    /// The present value of this outcome in each year
    pub yearly: Vec<f64>,
}
