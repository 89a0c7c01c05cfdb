//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod validation;
mod value;

pub use request::{ScheduledSms, VerifySms};
pub use validation::ValidationError;
pub use value::{
    ApiKey, LastHours, MessageId, Mobile, PhoneNumber, SendTime, SentPage, TemplateId,
    TemplateParameter, TemplateParameters,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_rejects_empty() {
        assert!(matches!(
            ApiKey::new("   "),
            Err(ValidationError::Empty {
                field: ApiKey::FIELD
            })
        ));
    }

    #[test]
    fn mobile_rejects_empty() {
        assert!(matches!(
            Mobile::new(""),
            Err(ValidationError::Empty {
                field: Mobile::FIELD
            })
        ));
    }

    #[test]
    fn verify_sms_schedules_with_send_time() {
        let message = VerifySms::new(
            Mobile::new("09123456789").unwrap(),
            TemplateId::new(12345),
            TemplateParameters::single("CODE", "000000").unwrap(),
        );
        let send_time = SendTime::parse("2025-03-01 08:30:00").unwrap();

        let scheduled = message.clone().at(send_time);
        assert_eq!(scheduled.message(), &message);
        assert_eq!(scheduled.send_time(), send_time);
        assert_eq!(scheduled, ScheduledSms::new(message, send_time));
    }

    #[test]
    fn scheduling_with_free_text_time_fails_at_construction() {
        let message = VerifySms::new(
            Mobile::new("09123456789").unwrap(),
            TemplateId::new(12345),
            TemplateParameters::single("CODE", "000000").unwrap(),
        );
        let err = SendTime::parse("next tuesday")
            .map(|time| message.at(time))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSendTime { .. }));
    }
}
