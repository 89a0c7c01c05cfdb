use serde_json::Value;

use super::{Endpoint, list_field, optional_field};
use crate::domain::{LastHours, MessageId, SentPage};

const STATUS_FIELD: &str = "status";
const MESSAGES_FIELD: &str = "messages";

pub fn encode_sms_status(message_id: &MessageId) -> Endpoint {
    Endpoint::get(format!("sms/status/{}", message_id.as_str()))
}

pub fn encode_delivery_report(message_id: &MessageId) -> Endpoint {
    Endpoint::get(format!("sms/delivery/{}", message_id.as_str()))
}

pub fn encode_cancel_scheduled(message_id: &MessageId) -> Endpoint {
    Endpoint::delete(format!("sms/schedule/{}", message_id.as_str()))
}

pub fn encode_sent_messages(page: SentPage) -> Endpoint {
    Endpoint::get(format!(
        "sms/sent?{}={}&{}={}",
        SentPage::PAGE_FIELD,
        page.page(),
        SentPage::PER_PAGE_FIELD,
        page.per_page()
    ))
}

pub fn encode_recent_reports(hours: LastHours) -> Endpoint {
    Endpoint::get(format!("sms/reports?{}={}", LastHours::FIELD, hours.value()))
}

/// `status` of a status or delivery lookup, if the service reported one.
pub fn decode_status_response(response: &Value) -> Option<Value> {
    optional_field(response, STATUS_FIELD)
}

/// `messages` of a sent-list or recent-reports lookup; empty when absent.
pub fn decode_messages_response(response: &Value) -> Vec<Value> {
    list_field(response, MESSAGES_FIELD)
}
