use crate::domain::value::{Mobile, SendTime, TemplateId, TemplateParameters};

/// A template-based message to a single recipient (`send/verify`, `sms/send-test`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifySms {
    mobile: Mobile,
    template_id: TemplateId,
    parameters: TemplateParameters,
}

impl VerifySms {
    pub fn new(mobile: Mobile, template_id: TemplateId, parameters: TemplateParameters) -> Self {
        Self {
            mobile,
            template_id,
            parameters,
        }
    }

    pub fn mobile(&self) -> &Mobile {
        &self.mobile
    }

    pub fn template_id(&self) -> TemplateId {
        self.template_id
    }

    pub fn parameters(&self) -> &TemplateParameters {
        &self.parameters
    }

    /// Schedule this message for later delivery.
    pub fn at(self, send_time: SendTime) -> ScheduledSms {
        ScheduledSms {
            message: self,
            send_time,
        }
    }
}

/// A template-based message delivered at a fixed time (`send/schedule`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledSms {
    message: VerifySms,
    send_time: SendTime,
}

impl ScheduledSms {
    pub fn new(message: VerifySms, send_time: SendTime) -> Self {
        Self { message, send_time }
    }

    pub fn message(&self) -> &VerifySms {
        &self.message
    }

    pub fn send_time(&self) -> SendTime {
        self.send_time
    }
}
