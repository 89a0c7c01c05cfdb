use serde::Serialize;

use super::{Endpoint, TransportError};
use crate::domain::{ScheduledSms, TemplateParameter, VerifySms};

const SEND_VERIFY_PATH: &str = "send/verify";
const SEND_SCHEDULE_PATH: &str = "send/schedule";
const SEND_TEST_PATH: &str = "sms/send-test";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyJsonRequest<'a> {
    mobile: &'a str,
    template_id: u32,
    parameters: Vec<ParameterJson<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    send_date_time: Option<String>,
}

#[derive(Debug, Serialize)]
struct ParameterJson<'a> {
    name: &'a str,
    value: &'a str,
}

impl<'a> From<&'a TemplateParameter> for ParameterJson<'a> {
    fn from(value: &'a TemplateParameter) -> Self {
        Self {
            name: value.name(),
            value: value.value(),
        }
    }
}

impl<'a> VerifyJsonRequest<'a> {
    fn new(message: &'a VerifySms) -> Self {
        Self {
            mobile: message.mobile().raw(),
            template_id: message.template_id().value(),
            parameters: message
                .parameters()
                .as_slice()
                .iter()
                .map(ParameterJson::from)
                .collect(),
            send_date_time: None,
        }
    }
}

pub fn encode_send_verify(message: &VerifySms) -> Result<Endpoint, TransportError> {
    let body = serde_json::to_value(VerifyJsonRequest::new(message))?;
    Ok(Endpoint::post(SEND_VERIFY_PATH, body))
}

pub fn encode_send_test(message: &VerifySms) -> Result<Endpoint, TransportError> {
    let body = serde_json::to_value(VerifyJsonRequest::new(message))?;
    Ok(Endpoint::post(SEND_TEST_PATH, body))
}

pub fn encode_send_schedule(request: &ScheduledSms) -> Result<Endpoint, TransportError> {
    let mut body = VerifyJsonRequest::new(request.message());
    body.send_date_time = Some(request.send_time().to_string());
    Ok(Endpoint::post(SEND_SCHEDULE_PATH, serde_json::to_value(body)?))
}
