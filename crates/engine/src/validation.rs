//! Schema validation of incoming transaction payloads.
//!
//! Fields are checked in a fixed order and the first violation is reported;
//! errors are never aggregated. Unknown fields are dropped.

use serde_json::{Map, Number, Value};

use crate::{EngineError, NewTransaction, ResultEngine, TransactionType};

/// Validate a raw JSON payload into a [`NewTransaction`].
pub fn validate_transaction(payload: &Value) -> ResultEngine<NewTransaction> {
    let Value::Object(fields) = payload else {
        return Err(EngineError::InvalidPayload(
            "\"value\" must be an object".to_string(),
        ));
    };

    let kind = kind(fields)?;
    let amount = amount(fields)?;
    let description = description(fields)?;

    Ok(NewTransaction {
        kind,
        amount,
        description,
    })
}

fn fails(field: &str, reason: &str) -> EngineError {
    EngineError::InvalidPayload(format!(
        "child \"{field}\" fails because [\"{field}\" {reason}]"
    ))
}

fn required<'a>(fields: &'a Map<String, Value>, field: &str) -> ResultEngine<&'a Value> {
    fields.get(field).ok_or_else(|| fails(field, "is required"))
}

fn kind(fields: &Map<String, Value>) -> ResultEngine<TransactionType> {
    let Value::String(value) = required(fields, "type")? else {
        return Err(fails("type", "must be a string"));
    };

    TransactionType::try_from(value.as_str()).map_err(|_| {
        let allowed = TransactionType::ALL
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        fails("type", &format!("must be one of [{allowed}]"))
    })
}

fn amount(fields: &Map<String, Value>) -> ResultEngine<Number> {
    match required(fields, "amount")? {
        Value::Number(number) => Ok(number.clone()),
        // Numeric strings are converted, as long as they hold a finite number.
        Value::String(text) => {
            parse_number(text.trim()).ok_or_else(|| fails("amount", "must be a number"))
        }
        _ => Err(fails("amount", "must be a number")),
    }
}

fn parse_number(text: &str) -> Option<Number> {
    if let Ok(value) = text.parse::<i64>() {
        return Some(Number::from(value));
    }
    if let Ok(value) = text.parse::<u64>() {
        return Some(Number::from(value));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

fn description(fields: &Map<String, Value>) -> ResultEngine<String> {
    match required(fields, "description")? {
        Value::String(text) if text.is_empty() => {
            Err(fails("description", "is not allowed to be empty"))
        }
        Value::String(text) => Ok(text.clone()),
        _ => Err(fails("description", "must be a string")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn message(payload: Value) -> String {
        match validate_transaction(&payload) {
            Err(EngineError::InvalidPayload(message)) => message,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_payload() {
        let tx = validate_transaction(&json!({
            "type": "expense",
            "amount": -1567,
            "description": "expense test",
        }))
        .unwrap();

        assert_eq!(tx.kind, TransactionType::Expense);
        assert_eq!(tx.amount, Number::from(-1567));
        assert_eq!(tx.description, "expense test");
    }

    #[test]
    fn strips_unknown_fields() {
        let tx = validate_transaction(&json!({
            "type": "income",
            "amount": 12.5,
            "description": "salary",
            "owner": "alice",
        }))
        .unwrap();

        let fields = tx.to_fields();
        assert_eq!(fields.len(), 3);
        assert!(!fields.contains_key("owner"));
    }

    #[test]
    fn missing_type() {
        assert_eq!(
            message(json!({"amount": -1567, "description": "expense test"})),
            "child \"type\" fails because [\"type\" is required]"
        );
    }

    #[test]
    fn unknown_type() {
        assert_eq!(
            message(json!({"type": "refund", "amount": 1, "description": "x"})),
            "child \"type\" fails because [\"type\" must be one of [expense, income]]"
        );
    }

    #[test]
    fn type_must_be_string() {
        assert_eq!(
            message(json!({"type": 3, "amount": 1, "description": "x"})),
            "child \"type\" fails because [\"type\" must be a string]"
        );
    }

    #[test]
    fn amount_checks() {
        assert_eq!(
            message(json!({"type": "income", "description": "x"})),
            "child \"amount\" fails because [\"amount\" is required]"
        );
        assert_eq!(
            message(json!({"type": "income", "amount": "lots", "description": "x"})),
            "child \"amount\" fails because [\"amount\" must be a number]"
        );
        assert_eq!(
            message(json!({"type": "income", "amount": null, "description": "x"})),
            "child \"amount\" fails because [\"amount\" must be a number]"
        );
    }

    #[test]
    fn numeric_string_amount_is_converted() {
        let tx = validate_transaction(&json!({
            "type": "income",
            "amount": "1678",
            "description": "income test",
        }))
        .unwrap();
        assert_eq!(tx.amount, Number::from(1678));
    }

    #[test]
    fn description_checks() {
        assert_eq!(
            message(json!({"type": "income", "amount": 1})),
            "child \"description\" fails because [\"description\" is required]"
        );
        assert_eq!(
            message(json!({"type": "income", "amount": 1, "description": ""})),
            "child \"description\" fails because [\"description\" is not allowed to be empty]"
        );
        assert_eq!(
            message(json!({"type": "income", "amount": 1, "description": ["x"]})),
            "child \"description\" fails because [\"description\" must be a string]"
        );
    }

    #[test]
    fn first_failure_wins() {
        assert_eq!(
            message(json!({"type": "bogus"})),
            "child \"type\" fails because [\"type\" must be one of [expense, income]]"
        );
    }

    #[test]
    fn payload_must_be_object() {
        assert_eq!(message(json!([1, 2])), "\"value\" must be an object");
        assert_eq!(message(Value::Null), "\"value\" must be an object");
    }
}
