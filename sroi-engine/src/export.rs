use crate::Valuation;
use std::borrow::Cow;
use std::io::Write;

/// The label of the synthetic row appended to the CSV table
pub const TOTALS_LABEL: &str = "TOTAL PV PER YEAR";

/// Options for [`export_csv`]
#[derive(Clone, Debug)]
pub struct CsvOptions {
    /// Prefix the output with a UTF-8 byte-order mark, so that spreadsheet
    /// software detects the encoding of non-ASCII labels
    pub bom: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { bom: true }
    }
}

/// Write the per-outcome, per-year breakdown of a valuation as a CSV table.
///
/// The table has one row per outcome followed by a synthetic
/// [`TOTALS_LABEL`] row, whose total column holds the grand total present
/// value and whose year columns hold the per-year totals.
pub fn export_csv(
    valuation: &Valuation,
    options: &CsvOptions,
    buffer: &mut impl Write,
) -> Result<(), std::io::Error> {
    if options.bom {
        buffer.write_all("\u{feff}".as_bytes())?;
    }

    write!(buffer, "Stakeholder/Outcome,Total PV (by Item)")?;
    for year in 1..=valuation.horizon_years() {
        write!(buffer, ",Y{year} PV")?;
    }
    writeln!(buffer)?;

    let outcomes = valuation.outcomes.iter().map(|outcome| {
        (
            outcome.label.as_str(),
            outcome.total_present_value,
            outcome.yearly.as_slice(),
        )
    });
    let totals = (
        TOTALS_LABEL,
        valuation.total_present_value,
        valuation.yearly_totals.as_slice(),
    );

    for (label, total, yearly) in outcomes.chain(std::iter::once(totals)) {
        write!(buffer, "{},{total}", quote(label))?;
        for value in yearly {
            write!(buffer, ",{value}")?;
        }
        writeln!(buffer)?;
    }

    Ok(())
}

// Fields are quoted only when they must be, per RFC 4180.
fn quote(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// The character repertoire a summary may use
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Charset {
    /// Any character may be written
    #[default]
    Unicode,
    /// Only ASCII is written; any other character is replaced with `?`
    Ascii,
}

impl Charset {
    /// Render text in this charset
    pub fn render<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Self::Ascii if !text.is_ascii() => Cow::Owned(
                text.chars()
                    .map(|c| if c.is_ascii() { c } else { '?' })
                    .collect(),
            ),
            _ => Cow::Borrowed(text),
        }
    }
}

/// Options for [`export_summary`]
#[derive(Clone, Debug)]
pub struct SummaryOptions {
    /// The currency suffix written after each amount
    pub currency: String,
    /// The number of decimal places for amounts
    pub precision: usize,
    /// The characters the renderer is able to display
    pub charset: Charset,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            currency: "THB".to_owned(),
            precision: 2,
            charset: Charset::Unicode,
        }
    }
}

/// Write a short, human-readable summary of a valuation.
///
/// With [`Charset::Ascii`], non-ASCII characters in the project name, the
/// outcome labels or the currency are replaced rather than causing a failure.
pub fn export_summary(
    name: &str,
    valuation: &Valuation,
    options: &SummaryOptions,
    buffer: &mut impl Write,
) -> Result<(), std::io::Error> {
    let SummaryOptions {
        currency,
        precision,
        charset,
    } = options;
    let currency = charset.render(currency);
    let amount = |value: f64| format!("{} {currency}", format_amount(value, *precision));

    writeln!(buffer, "SROI Summary Report")?;
    writeln!(buffer)?;
    writeln!(buffer, "Project: {}", charset.render(name))?;
    writeln!(buffer, "SROI Ratio: {:.2}", valuation.ratio)?;
    writeln!(
        buffer,
        "Total PV (TPV): {}",
        amount(valuation.total_present_value)
    )?;
    writeln!(
        buffer,
        "Net PV (NPV): {}",
        amount(valuation.net_present_value)
    )?;
    writeln!(buffer, "Total Investment: {}", amount(valuation.investment))?;

    if !valuation.outcomes.is_empty() {
        writeln!(buffer)?;
        writeln!(buffer, "Outcomes:")?;
        for outcome in valuation.outcomes.iter() {
            writeln!(
                buffer,
                "  {}: {}",
                charset.render(&outcome.label),
                amount(outcome.total_present_value)
            )?;
        }
    }

    Ok(())
}

/// Format an amount with a fixed number of decimals and comma-separated thousands
///
/// e.g. `format_amount(1234567.891, 2) == "1,234,567.89"`
pub fn format_amount(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let digits = format!("{:.*}", precision, value.abs());
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + whole.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}
