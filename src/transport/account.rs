use serde::Serialize;
use serde_json::Value;

use super::{Endpoint, TransportError, list_field, optional_field};
use crate::domain::Mobile;

const CREDIT_PATH: &str = "credit";
const CHECK_INVALID_PATH: &str = "sms/check-invalid";

const CREDIT_FIELD: &str = "credit";
const INVALID_NUMBERS_FIELD: &str = "invalid_numbers";

#[derive(Debug, Serialize)]
struct CheckInvalidJsonRequest<'a> {
    numbers: Vec<&'a str>,
}

pub fn encode_check_credit() -> Endpoint {
    Endpoint::get(CREDIT_PATH)
}

pub fn encode_check_invalid_numbers(numbers: &[Mobile]) -> Result<Endpoint, TransportError> {
    let body = CheckInvalidJsonRequest {
        numbers: numbers.iter().map(Mobile::raw).collect(),
    };
    Ok(Endpoint::post(CHECK_INVALID_PATH, serde_json::to_value(body)?))
}

pub fn decode_credit_response(response: &Value) -> Option<Value> {
    optional_field(response, CREDIT_FIELD)
}

pub fn decode_invalid_numbers_response(response: &Value) -> Vec<Value> {
    list_field(response, INVALID_NUMBERS_FIELD)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::transport::HttpMethod;

    use super::*;

    #[test]
    fn encode_check_credit_is_bodyless_get() {
        let endpoint = encode_check_credit();
        assert_eq!(endpoint.method, HttpMethod::Get);
        assert_eq!(endpoint.path, "credit");
        assert_eq!(endpoint.body, None);
    }

    #[test]
    fn encode_check_invalid_numbers_lists_raw_numbers() {
        let numbers = vec![
            Mobile::new("09123456789").unwrap(),
            Mobile::new("09351234567").unwrap(),
        ];
        let endpoint = encode_check_invalid_numbers(&numbers).unwrap();
        assert_eq!(endpoint.method, HttpMethod::Post);
        assert_eq!(endpoint.path, "sms/check-invalid");
        assert_eq!(
            endpoint.body,
            Some(json!({"numbers": ["09123456789", "09351234567"]}))
        );
    }

    #[test]
    fn decode_credit_extracts_value_verbatim() {
        assert_eq!(
            decode_credit_response(&json!({"credit": 1500})),
            Some(json!(1500))
        );
        assert_eq!(
            decode_credit_response(&json!({"credit": "1500.50"})),
            Some(json!("1500.50"))
        );
        assert_eq!(decode_credit_response(&json!({})), None);
    }

    #[test]
    fn decode_invalid_numbers_defaults_to_empty() {
        assert_eq!(
            decode_invalid_numbers_response(&json!({"invalid_numbers": ["09351234567"]})),
            vec![json!("09351234567")]
        );
        assert!(decode_invalid_numbers_response(&json!({"status": 1})).is_empty());
    }
}
