use super::{Fraction, FractionDto, FractionError};

/// A claimed outcome for a single stakeholder.
///
/// The first-year impact of an outcome is its financial proxy times the
/// quantity achieved, reduced by three independent adjustment factors. The
/// factors are applied multiplicatively and are never capped in combination:
/// deadweight, displacement and attribution of 0.6 each leave a residual of
/// 0.4³ = 0.064 of the raw value.
///
/// Outcomes with an empty label are placeholders (e.g. an unfilled form row);
/// they are retained here but excluded from valuation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "OutcomeRecordDto")
)]
pub struct OutcomeRecord {
    /// The stakeholder/outcome pairing this record describes
    pub label: String,
    /// The monetary value assigned to one unit of outcome
    pub proxy_value: f64,
    /// The number of units of outcome achieved
    pub quantity: f64,
    /// The proportion of the outcome that would have happened anyway
    pub deadweight: Fraction,
    /// The proportion of the outcome that merely displaces other outcomes
    pub displacement: Fraction,
    /// The proportion of the outcome owed to other actors
    pub attribution: Fraction,
    /// The annual decay of the outcome, applied from the second year onwards
    pub drop_off: Fraction,
}

impl OutcomeRecord {
    /// Creates a record with no adjustments.
    ///
    /// The proxy value, the quantity and their product must all be finite;
    /// otherwise a factor of 1 would multiply an infinite raw value into NaN
    /// instead of zeroing it.
    pub fn new(
        label: impl Into<String>,
        proxy_value: f64,
        quantity: f64,
    ) -> Result<Self, OutcomeError> {
        let proxy_value = finite("proxy_value", proxy_value)?;
        let quantity = finite("quantity", quantity)?;
        if !(proxy_value * quantity).is_finite() {
            return Err(OutcomeError::Overflow {
                proxy_value,
                quantity,
            });
        }

        Ok(Self {
            label: label.into(),
            proxy_value,
            quantity,
            deadweight: Fraction::ZERO,
            displacement: Fraction::ZERO,
            attribution: Fraction::ZERO,
            drop_off: Fraction::ZERO,
        })
    }

    /// Sets the deadweight
    pub fn with_deadweight(self, deadweight: Fraction) -> Self {
        Self { deadweight, ..self }
    }

    /// Sets the displacement
    pub fn with_displacement(self, displacement: Fraction) -> Self {
        Self {
            displacement,
            ..self
        }
    }

    /// Sets the attribution
    pub fn with_attribution(self, attribution: Fraction) -> Self {
        Self {
            attribution,
            ..self
        }
    }

    /// Sets the drop-off
    pub fn with_drop_off(self, drop_off: Fraction) -> Self {
        Self { drop_off, ..self }
    }

    /// Whether this record takes part in a valuation
    pub fn is_labelled(&self) -> bool {
        !self.label.is_empty()
    }

    /// The proportion of the raw value that survives the three first-year adjustments
    pub fn residual(&self) -> f64 {
        self.deadweight.complement()
            * self.displacement.complement()
            * self.attribution.complement()
    }

    /// The first-year net impact: `proxy × quantity × (1 − dw) × (1 − disp) × (1 − attr)`
    pub fn net_impact(&self) -> f64 {
        (self.proxy_value * self.quantity)
            * self.deadweight.complement()
            * self.displacement.complement()
            * self.attribution.complement()
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, OutcomeError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OutcomeError::NonFinite { field, value })
    }
}

/// DTO to ensure that we always validate when we deserialize from an untrusted source
///
/// Every field is optional: the label defaults to empty and the numbers to zero.
/// Unknown keys are rejected, since a misspelled factor would otherwise be zero.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(deny_unknown_fields)
)]
#[derive(Clone, Debug, Default)]
pub struct OutcomeRecordDto {
    /// The stakeholder/outcome pairing; records with an empty label are skipped
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: String,
    /// The monetary value assigned to one unit of outcome
    #[cfg_attr(feature = "serde", serde(default))]
    pub proxy_value: f64,
    /// The number of units of outcome achieved
    #[cfg_attr(feature = "serde", serde(default))]
    pub quantity: f64,
    /// The deadweight, as a fraction or `{ "percent": .. }`
    #[cfg_attr(feature = "serde", serde(default))]
    pub deadweight: FractionDto,
    /// The displacement, as a fraction or `{ "percent": .. }`
    #[cfg_attr(feature = "serde", serde(default))]
    pub displacement: FractionDto,
    /// The attribution, as a fraction or `{ "percent": .. }`
    #[cfg_attr(feature = "serde", serde(default))]
    pub attribution: FractionDto,
    /// The annual drop-off, as a fraction or `{ "percent": .. }`
    #[cfg_attr(feature = "serde", serde(default))]
    pub drop_off: FractionDto,
}

impl TryFrom<OutcomeRecordDto> for OutcomeRecord {
    type Error = OutcomeError;

    fn try_from(value: OutcomeRecordDto) -> Result<Self, Self::Error> {
        let fraction = |field: &'static str, dto: FractionDto| {
            Fraction::try_from(dto).map_err(|source| OutcomeError::Fraction { field, source })
        };

        Ok(Self::new(value.label, value.proxy_value, value.quantity)?
            .with_deadweight(fraction("deadweight", value.deadweight)?)
            .with_displacement(fraction("displacement", value.displacement)?)
            .with_attribution(fraction("attribution", value.attribution)?)
            .with_drop_off(fraction("drop_off", value.drop_off)?))
    }
}

/// The ways in which an outcome record can be invalid
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum OutcomeError {
    /// Error when the proxy value or quantity is NaN or infinite
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// The offending field
        field: &'static str,
        /// The offending value
        value: f64,
    },
    /// Error when the raw value `proxy_value × quantity` is not finite
    #[error("proxy_value {proxy_value} × quantity {quantity} overflows")]
    Overflow {
        /// The proxy value
        proxy_value: f64,
        /// The quantity
        quantity: f64,
    },
    /// Error when an adjustment factor is invalid
    #[error("invalid {field}: {source}")]
    Fraction {
        /// The offending field
        field: &'static str,
        /// The underlying validation failure
        source: FractionError,
    },
}
