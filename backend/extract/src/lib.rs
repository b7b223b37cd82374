//! `recibo-extract` — validates the structuring model's loose JSON reply
//! against the expense schema.
//!
//! `amount` and `date` are required; their absence is a validation failure,
//! never a fabricated default. Everything else gets a defined default when
//! missing or mistyped, so a 200 response always carries every field.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use recibo_core::{ExpenseRecord, ReciboError};

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Coerce a loosely-typed JSON object into an `ExpenseRecord`.
pub fn validate_expense(value: Value) -> Result<ExpenseRecord, ReciboError> {
    let Some(obj) = value.as_object() else {
        return Err(ReciboError::Validation(
            "structuring reply is not a JSON object".to_string(),
        ));
    };

    let amount = coerce_amount(obj.get("amount"))?;
    let date = coerce_date(obj.get("date"))?;

    Ok(ExpenseRecord {
        amount,
        date,
        companions: string_list(obj.get("companions")),
        description: string_or(obj.get("description"), ""),
        category: string_or(obj.get("category"), "Other"),
        subcategory: string_or(obj.get("subcategory"), ""),
        payment_method: obj
            .get("paymentMethod")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

fn coerce_amount(value: Option<&Value>) -> Result<f64, ReciboError> {
    // Models occasionally emit "42.50" as a string; accept that, but nothing
    // looser.
    let amount = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match amount {
        Some(a) if a.is_finite() && a >= 0.0 => Ok(a),
        Some(_) => Err(ReciboError::Validation(
            "amount must be a non-negative number".to_string(),
        )),
        None => Err(ReciboError::Validation(
            "required field `amount` is missing or not a number".to_string(),
        )),
    }
}

fn coerce_date(value: Option<&Value>) -> Result<String, ReciboError> {
    let Some(raw) = value.and_then(Value::as_str) else {
        return Err(ReciboError::Validation(
            "required field `date` is missing or not a string".to_string(),
        ));
    };
    normalize_date(raw).ok_or_else(|| {
        ReciboError::Validation(format!("could not parse `date` value: {raw:?}"))
    })
}

/// Normalize a date string to `YYYY-MM-DDTHH:MM:SS`.
///
/// Accepts the target format itself, RFC 3339, `YYYY-MM-DD HH:MM:SS`, and a
/// bare `YYYY-MM-DD` (midnight assumed).
fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, DATE_FORMAT) {
        return Some(dt.format(DATE_FORMAT).to_string());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local().format(DATE_FORMAT).to_string());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.format(DATE_FORMAT).to_string());
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.format(DATE_FORMAT).to_string());
    }
    None
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn string_or(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_reply() -> Value {
        json!({
            "amount": 42.5,
            "date": "2024-03-01T13:45:00",
            "companions": ["Ana"],
            "description": "Biryani Mahal: chicken biryani, lassi",
            "category": "Food",
            "subcategory": "Dining",
            "paymentMethod": "UPI",
        })
    }

    #[test]
    fn accepts_a_complete_reply() {
        let record = validate_expense(full_reply()).unwrap();
        assert_eq!(record.amount, 42.5);
        assert_eq!(record.date, "2024-03-01T13:45:00");
        assert_eq!(record.companions, vec!["Ana".to_string()]);
        assert_eq!(record.payment_method.as_deref(), Some("UPI"));
    }

    #[test]
    fn missing_amount_is_a_validation_failure() {
        let mut reply = full_reply();
        reply.as_object_mut().unwrap().remove("amount");
        let err = validate_expense(reply).unwrap_err();
        assert!(matches!(err, ReciboError::Validation(_)));
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn missing_date_is_a_validation_failure() {
        let mut reply = full_reply();
        reply.as_object_mut().unwrap().remove("date");
        assert!(matches!(
            validate_expense(reply).unwrap_err(),
            ReciboError::Validation(_)
        ));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let reply = json!({ "amount": -5.0, "date": "2024-03-01" });
        assert!(matches!(
            validate_expense(reply).unwrap_err(),
            ReciboError::Validation(_)
        ));
    }

    #[test]
    fn numeric_string_amount_is_coerced() {
        let reply = json!({ "amount": "17.80", "date": "2024-03-01" });
        assert_eq!(validate_expense(reply).unwrap().amount, 17.80);
    }

    #[test]
    fn missing_companions_defaults_to_empty_list() {
        let reply = json!({ "amount": 5, "date": "2024-03-01" });
        let record = validate_expense(reply).unwrap();
        assert!(record.companions.is_empty());
    }

    #[test]
    fn optional_fields_get_defined_defaults() {
        let reply = json!({ "amount": 5, "date": "2024-03-01" });
        let record = validate_expense(reply).unwrap();
        assert_eq!(record.description, "");
        assert_eq!(record.category, "Other");
        assert_eq!(record.subcategory, "");
        assert_eq!(record.payment_method, None);
    }

    #[test]
    fn mistyped_optional_fields_fall_back_to_defaults() {
        let reply = json!({
            "amount": 5,
            "date": "2024-03-01",
            "companions": "nobody",
            "category": 7,
        });
        let record = validate_expense(reply).unwrap();
        assert!(record.companions.is_empty());
        assert_eq!(record.category, "Other");
    }

    #[test]
    fn bare_date_gets_midnight() {
        let reply = json!({ "amount": 5, "date": "2024-03-01" });
        assert_eq!(validate_expense(reply).unwrap().date, "2024-03-01T00:00:00");
    }

    #[test]
    fn rfc3339_date_is_normalized() {
        let reply = json!({ "amount": 5, "date": "2024-03-01T13:45:00+05:30" });
        assert_eq!(validate_expense(reply).unwrap().date, "2024-03-01T13:45:00");
    }

    #[test]
    fn unparseable_date_is_a_validation_failure() {
        let reply = json!({ "amount": 5, "date": "last tuesday" });
        assert!(matches!(
            validate_expense(reply).unwrap_err(),
            ReciboError::Validation(_)
        ));
    }

    #[test]
    fn non_object_reply_is_a_validation_failure() {
        assert!(matches!(
            validate_expense(json!([1, 2, 3])).unwrap_err(),
            ReciboError::Validation(_)
        ));
    }

    #[test]
    fn non_string_companions_entries_are_dropped() {
        let reply = json!({
            "amount": 5,
            "date": "2024-03-01",
            "companions": ["Ana", 3, null, "Luis"],
        });
        let record = validate_expense(reply).unwrap();
        assert_eq!(record.companions, vec!["Ana".to_string(), "Luis".to_string()]);
    }
}
