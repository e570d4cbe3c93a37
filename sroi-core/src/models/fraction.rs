/// A proportion in the closed interval [0, 1].
///
/// Adjustment factors (deadweight, displacement, attribution) and the annual
/// drop-off rate are all expressed as fractions. Percent-based inputs are
/// normalized exactly once, when they are converted into a `Fraction`, so the
/// rest of the system only ever deals with a single unit convention.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "FractionDto", into = "FractionDto")
)]
pub struct Fraction(f64);

impl Fraction {
    /// The fraction representing "none of it"
    pub const ZERO: Self = Self(0.0);

    /// The fraction representing "all of it"
    pub const ONE: Self = Self(1.0);

    /// Creates a fraction, validating that it lies within [0, 1]
    pub fn new(value: f64) -> Result<Self, FractionError> {
        if value.is_nan() {
            Err(FractionError::NaN)
        } else if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FractionError::OutOfRange(value))
        }
    }

    /// Creates a fraction from a percentage, validating that it lies within [0, 100]
    pub fn from_percent(percent: f64) -> Result<Self, FractionError> {
        if percent.is_nan() {
            Err(FractionError::NaN)
        } else if (0.0..=100.0).contains(&percent) {
            Ok(Self(percent / 100.0))
        } else {
            Err(FractionError::PercentOutOfRange(percent))
        }
    }

    /// The underlying value, within [0, 1]
    pub fn value(self) -> f64 {
        self.0
    }

    /// The proportion that remains after this fraction is removed, i.e. `1 - value`
    pub fn complement(self) -> f64 {
        1.0 - self.0
    }
}

impl From<Fraction> for f64 {
    fn from(value: Fraction) -> Self {
        value.0
    }
}

/// The ways in which a fraction can be invalid
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FractionError {
    /// Error when the value is NaN
    #[error("NaN value encountered")]
    NaN,
    /// Error when a fraction lies outside [0, 1]
    #[error("fraction {0} lies outside [0, 1]")]
    OutOfRange(f64),
    /// Error when a percentage lies outside [0, 100]
    #[error("percentage {0} lies outside [0, 100]")]
    PercentOutOfRange(f64),
}

/// DTO accepting either a bare fraction (`0.25`) or a percentage (`{ "percent": 25 }`)
///
/// This is the single place where percent inputs are converted into fractions.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema), schemars(untagged))]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FractionDto {
    /// A value in [0, 1]
    Fraction(f64),
    /// A value in [0, 100]
    Percent(PercentDto),
}

/// A percentage, written as an object so that it cannot be confused with a fraction
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(deny_unknown_fields)
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PercentDto {
    /// The percentage, in [0, 100]
    pub percent: f64,
}

impl Default for FractionDto {
    fn default() -> Self {
        Self::Fraction(0.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FractionDto {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // JSON integers arrive through the integer visitors, so all three numeric
        // paths need to map onto the bare fraction variant.
        serde_untagged::UntaggedEnumVisitor::new()
            .f64(|value| Ok(FractionDto::Fraction(value)))
            .i64(|value| Ok(FractionDto::Fraction(value as f64)))
            .u64(|value| Ok(FractionDto::Fraction(value as f64)))
            .map(|map| map.deserialize().map(FractionDto::Percent))
            .deserialize(deserializer)
    }
}

impl TryFrom<FractionDto> for Fraction {
    type Error = FractionError;

    fn try_from(value: FractionDto) -> Result<Self, Self::Error> {
        match value {
            FractionDto::Fraction(fraction) => Fraction::new(fraction),
            FractionDto::Percent(PercentDto { percent }) => Fraction::from_percent(percent),
        }
    }
}

impl From<Fraction> for FractionDto {
    fn from(value: Fraction) -> Self {
        Self::Fraction(value.0)
    }
}
