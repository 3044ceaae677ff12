use crate::encode::encode;
use crate::model::PricePredictor;
use crate::types::{CarInput, PredictError};

/// The whole prediction flow: encode the selections, run the model, hand
/// back one price. Either stage failing surfaces as a single PredictError;
/// the caller renders it and keeps serving.
pub fn run_prediction(
    model: &dyn PricePredictor,
    input: &CarInput,
) -> Result<f64, PredictError> {
    let record = encode(input)?;
    model.predict(&record)
}

pub fn format_price(price: f64) -> String {
    format!("Predicted Selling Price: ₹ {}", group_thousands(price))
}

pub fn format_error(err: &PredictError) -> String {
    format!("Prediction failed: {}", err)
}

/// Two decimal places with comma thousands grouping, e.g. 456000.0 ->
/// "456,000.00". Plain western grouping, matching the formatting the model's
/// consumers already expect.
fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f),
        None => (digits, "00"),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_inserts_commas_every_three_digits() {
        assert_eq!(group_thousands(0.0), "0.00");
        assert_eq!(group_thousands(999.0), "999.00");
        assert_eq!(group_thousands(1000.0), "1,000.00");
        assert_eq!(group_thousands(456000.0), "456,000.00");
        assert_eq!(group_thousands(1234567.891), "1,234,567.89");
        assert_eq!(group_thousands(-54321.5), "-54,321.50");
    }

    #[test]
    fn price_message_carries_currency_symbol() {
        let msg = format_price(456000.0);
        assert_eq!(msg, "Predicted Selling Price: ₹ 456,000.00");
    }
}
