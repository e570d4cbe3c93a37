/// An annual discount rate, expressed in percent.
///
/// Negative rates are permitted and amplify rather than discount future
/// value. Rates at or below -100% are rejected, as the discount factor
/// `(1 + rate/100)^n` would be zero (dividing by zero in year one) or
/// alternate in sign.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiscountRate(f64);

impl DiscountRate {
    /// Creates a discount rate from a percentage, validating that it is finite and above -100%
    pub fn new(percent: f64) -> Result<Self, ParameterError> {
        if percent.is_finite() && percent > -100.0 {
            Ok(Self(percent))
        } else {
            Err(ParameterError::DiscountRate(percent))
        }
    }

    /// The rate, in percent
    pub fn percent(self) -> f64 {
        self.0
    }

    /// The compounded discount factor `(1 + rate/100)^year` for the given year
    pub fn factor(self, year: u32) -> f64 {
        (1.0 + self.0 / 100.0).powf(f64::from(year))
    }
}

/// The global parameters of an SROI analysis.
///
/// These are constructed fresh for every valuation and validated up front, so
/// that the engine never has to deal with a degenerate horizon or discount
/// rate. Note that a non-positive investment is *not* an error: the valuation
/// defines the ratio to be zero in that case.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectParameters {
    investment: f64,
    discount_rate: DiscountRate,
    horizon_years: u32,
}

impl ProjectParameters {
    /// Creates a validated set of project parameters
    ///
    /// # Errors
    ///
    /// Returns `ParameterError` if the investment is not finite, the discount
    /// rate is not finite or is at or below -100%, or the horizon is zero.
    pub fn new(
        investment: f64,
        discount_rate_percent: f64,
        horizon_years: u32,
    ) -> Result<Self, ParameterError> {
        if !investment.is_finite() {
            return Err(ParameterError::Investment(investment));
        }
        if horizon_years == 0 {
            return Err(ParameterError::Horizon);
        }
        Ok(Self {
            investment,
            discount_rate: DiscountRate::new(discount_rate_percent)?,
            horizon_years,
        })
    }

    /// The total investment committed to the project
    pub fn investment(&self) -> f64 {
        self.investment
    }

    /// The annual discount rate
    pub fn discount_rate(&self) -> DiscountRate {
        self.discount_rate
    }

    /// The number of years over which impact is projected (always at least one)
    pub fn horizon_years(&self) -> u32 {
        self.horizon_years
    }
}

/// The ways in which project parameters can be invalid
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ParameterError {
    /// Error when the projection horizon is zero years
    #[error("the horizon must span at least one year")]
    Horizon,
    /// Error when the discount rate is non-finite or at or below -100%
    #[error("discount rate {0}% must be finite and greater than -100%")]
    DiscountRate(f64),
    /// Error when the investment is NaN or infinite
    #[error("investment {0} must be finite")]
    Investment(f64),
}
