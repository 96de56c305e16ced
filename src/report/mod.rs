use serde::Serialize;

pub mod json;
pub mod table;

pub const SIGNIFICANT_DIGITS: usize = 8;

/// One rendered line of the score report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub structure: String,
    pub lattice: f64,
    pub basis: f64,
    pub weighted: f64,
}

/// Formats `v` with `digits` significant digits, keeping trailing zeros.
///
/// Values whose decimal exponent is below -5 or at least `digits` switch to
/// exponent notation (`1.2345678e-07`), like C's `%#.*g`.
pub fn format_sig(v: f64, digits: usize) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let digits = digits.max(1);
    let sci = format!("{:.*e}", digits - 1, v);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp = exp.parse::<i32>().unwrap_or(0);
    if exp < -5 || exp >= digits as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exp).max(0) as usize;
        format!("{:.*}", decimals, v)
    }
}

pub fn format_score(v: f64) -> String {
    format_sig(v, SIGNIFICANT_DIGITS)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
