//! Runs every SMS.ir operation once against the live API and prints the outcome.
//!
//! Required: `SMSIR_API_KEY`. Optional: `SMSIR_MOBILE`, `SMSIR_SECOND_MOBILE`,
//! `SMSIR_TEMPLATE_ID`, `SMSIR_MESSAGE_ID`, `SMSIR_LOG_FILE` (defaults to `sms.log`).

use std::fmt::Display;
use std::io;

use smsir::logging::{self, DEFAULT_LOG_FILE};
use smsir::{
    ApiKey, LastHours, MessageId, Mobile, SentPage, SmsIrClient, TemplateId, TemplateParameters,
    VerifySms,
};

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

fn report<T: Display, E: Display>(step: &str, outcome: Result<T, E>) {
    match outcome {
        Ok(value) => println!("{step}: {value}"),
        Err(err) => println!("{step} failed: {err}"),
    }
}

fn show_list(values: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::Value::Array(values)
}

fn show_optional(value: Option<serde_json::Value>) -> serde_json::Value {
    value.unwrap_or(serde_json::Value::Null)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("SMSIR_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSIR_API_KEY environment variable is required",
        )
    })?;
    logging::init_file_logging(env_or("SMSIR_LOG_FILE", DEFAULT_LOG_FILE))?;

    let mobile = Mobile::new(env_or("SMSIR_MOBILE", "09123456789"))?;
    let second_mobile = Mobile::new(env_or("SMSIR_SECOND_MOBILE", "09351234567"))?;
    let template_id = TemplateId::new(env_or("SMSIR_TEMPLATE_ID", "12345").trim().parse()?);
    let message_id = MessageId::new(env_or("SMSIR_MESSAGE_ID", "1234567890"))?;

    let client = SmsIrClient::new(ApiKey::new(api_key)?);

    let single = VerifySms::new(
        mobile.clone(),
        template_id,
        TemplateParameters::single("CODE", "000000")?,
    );
    report("single send", client.send_sms(single).await);

    report(
        "custom template send",
        client
            .send_sms_with_custom_template(
                mobile.clone(),
                template_id,
                [("CODE", "789654"), ("NAME", "Ali")],
            )
            .await,
    );

    let bulk = vec![
        VerifySms::new(
            mobile.clone(),
            template_id,
            TemplateParameters::single("CODE", "111111")?,
        ),
        VerifySms::new(
            second_mobile.clone(),
            template_id,
            TemplateParameters::single("CODE", "222222")?,
        ),
    ];
    for (recipient, outcome) in client.send_bulk_sms_with_different_values(bulk).await {
        report(&format!("bulk send to {recipient}"), outcome);
    }

    report(
        "sent messages",
        client
            .get_sent_messages(SentPage::default())
            .await
            .map(show_list),
    );

    report(
        "recent reports",
        client
            .get_recent_sms_reports(LastHours::default())
            .await
            .map(show_list),
    );

    report(
        "invalid numbers",
        client
            .check_invalid_numbers(&[mobile.clone(), second_mobile])
            .await
            .map(show_list),
    );

    let test = VerifySms::new(
        mobile,
        template_id,
        TemplateParameters::single("CODE", "999999")?,
    );
    report("test send", client.send_test_sms(test).await);

    report(
        "sms status",
        client.get_sms_status(&message_id).await.map(show_optional),
    );

    report(
        "delivery report",
        client
            .get_delivery_report(&message_id)
            .await
            .map(show_optional),
    );

    report(
        "cancel scheduled",
        client.cancel_scheduled_sms(&message_id).await,
    );

    report(
        "credit",
        client.check_credit().await.map(show_optional),
    );

    Ok(())
}
