//! Extracts the exchange rate from a calculator response body.
//!
//! The endpoint answers with either a JSON document listing the two
//! currencies' values, or an HTML fragment with the rate in a
//! `<span class="rate _rate">` element. JSON is always tried first; the
//! HTML pattern is only consulted when the body does not parse as the
//! calculator JSON.

use crate::core::ExchangeError;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use tracing::debug;

static RATE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span class="rate _rate">([\d,.]+)</span>"#).expect("rate pattern is valid")
});

// Valid JSON without a usable `country` list (`{}`, `[]`, `"country": null`)
// fails to deserialize here and so goes on to the HTML pattern, ending in
// `UnparsableRate` rather than `InvalidRate` when no span is present.
#[derive(Deserialize, Debug)]
struct CalculatorResponse {
    country: Vec<CountryValue>,
}

#[derive(Deserialize, Debug)]
struct CountryValue {
    value: String,
}

/// Parses the longest leading decimal number in `text` once comma
/// thousands separators are removed, so trailing text such as a unit or a
/// stray dot is ignored. Input without a leading number becomes NaN so it
/// is caught by the rate check.
fn parse_grouped_number(text: &str) -> f64 {
    let cleaned = text.replace(',', "");
    let cleaned = cleaned.trim_start();
    let bytes = cleaned.as_bytes();

    let skip_digits = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = match bytes.first() {
        Some(b'+' | b'-') => 1,
        _ => 0,
    };
    let int_end = skip_digits(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(end + 1);
        has_digits |= frac_end > end + 1;
        end = frac_end;
    }
    if !has_digits {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = skip_digits(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    cleaned[..end].parse().unwrap_or(f64::NAN)
}

/// Reads the rate from the JSON payload as `country[1] / country[0]`.
///
/// Returns `Ok(None)` when the payload lists fewer than two countries.
pub fn parse_json_rate(body: &str) -> Result<Option<f64>, serde_json::Error> {
    let data: CalculatorResponse = serde_json::from_str(body)?;
    match data.country.as_slice() {
        [from, to, ..] => {
            let from_value = parse_grouped_number(&from.value);
            let to_value = parse_grouped_number(&to.value);
            Ok(Some(to_value / from_value))
        }
        _ => Ok(None),
    }
}

/// Reads the rate from the first `<span class="rate _rate">` in the body.
pub fn parse_html_rate(body: &str) -> Option<f64> {
    RATE_SPAN
        .captures(body)
        .map(|caps| parse_grouped_number(&caps[1]))
}

pub fn parse_rate(body: &str) -> Result<f64, ExchangeError> {
    let rate = match parse_json_rate(body) {
        Ok(rate) => rate,
        Err(e) => {
            debug!(error = %e, "Body is not calculator JSON, trying HTML pattern");
            Some(parse_html_rate(body).ok_or(ExchangeError::UnparsableRate)?)
        }
    };

    match rate {
        Some(rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
        Some(rate) => Err(ExchangeError::InvalidRate(rate.to_string())),
        None => Err(ExchangeError::InvalidRate(
            "response lists fewer than two currencies".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_rate_divides_target_by_source() {
        let body = r#"{"country":[{"value":"1,000"},{"value":"1,350,000"}]}"#;
        assert_eq!(parse_rate(body).unwrap(), 1350.0);
    }

    #[test]
    fn test_json_rate_fractional() {
        let body = r#"{
            "pkid": 141,
            "country": [
                {"value": "10,000", "currencyUnit": "원"},
                {"value": "7.25", "currencyUnit": "달러"}
            ]
        }"#;
        let rate = parse_rate(body).unwrap();
        assert!((rate - 0.000725).abs() < 1e-12);
    }

    #[test]
    fn test_html_fallback() {
        let body = r#"<div class="calc"><span class="rate _rate">1,234.5</span>{"broken": </div>"#;
        assert!(parse_json_rate(body).is_err());
        assert_eq!(parse_rate(body).unwrap(), 1234.5);
    }

    #[test]
    fn test_mismatched_json_shape_falls_back_to_html() {
        let body = r#"{"country": "unavailable"}"#;
        assert!(parse_json_rate(body).is_err());
        assert_eq!(parse_rate(body), Err(ExchangeError::UnparsableRate));

        let body = r#"{"country": []}<span class="rate _rate">987.6</span>"#;
        assert_eq!(parse_rate(body).unwrap(), 987.6);
    }

    #[test]
    fn test_numbers_with_trailing_text_use_leading_value() {
        assert_eq!(parse_grouped_number("1,234.5."), 1234.5);
        assert_eq!(parse_grouped_number("1.2.3"), 1.2);
        assert_eq!(parse_grouped_number("1,350원"), 1350.0);
        assert_eq!(parse_grouped_number(" 7."), 7.0);
        assert_eq!(parse_grouped_number(".5"), 0.5);
        assert_eq!(parse_grouped_number("-3"), -3.0);
        assert_eq!(parse_grouped_number("1.5e3x"), 1500.0);
        assert_eq!(parse_grouped_number("2e"), 2.0);
        assert!(parse_grouped_number("").is_nan());
        assert!(parse_grouped_number("원").is_nan());
        assert!(parse_grouped_number("-.").is_nan());

        let body = r#"<span class="rate _rate">1,234.5.</span>"#;
        assert_eq!(parse_rate(body).unwrap(), 1234.5);

        let body = r#"{"country":[{"value":"1달러"},{"value":"1,350원"}]}"#;
        assert_eq!(parse_rate(body).unwrap(), 1350.0);
    }

    #[test]
    fn test_unparsable_body() {
        assert_eq!(
            parse_rate("<html><body>nothing here</body></html>"),
            Err(ExchangeError::UnparsableRate)
        );
        assert_eq!(parse_rate("{}"), Err(ExchangeError::UnparsableRate));
        assert_eq!(parse_rate(""), Err(ExchangeError::UnparsableRate));
    }

    #[test]
    fn test_single_country_is_invalid_rate() {
        let body = r#"{"country":[{"value":"1"}]}"#;
        assert!(matches!(parse_rate(body), Err(ExchangeError::InvalidRate(_))));
    }

    #[test]
    fn test_non_positive_or_non_numeric_rates_rejected() {
        for body in [
            r#"{"country":[{"value":"1"},{"value":"0"}]}"#,
            r#"{"country":[{"value":"1"},{"value":"-3"}]}"#,
            r#"{"country":[{"value":"0"},{"value":"1,300"}]}"#,
            r#"{"country":[{"value":"one"},{"value":"1,300"}]}"#,
            r#"<span class="rate _rate">0.00</span>"#,
            r#"<span class="rate _rate">.</span>"#,
            r#"{"country":[{"value":"1"},{"value":"원"}]}"#,
        ] {
            assert!(
                matches!(parse_rate(body), Err(ExchangeError::InvalidRate(_))),
                "body should yield an invalid rate: {body}"
            );
        }
    }
}
