use std::io;

use chrono::{Duration, Local};
use smsir::{ApiKey, Mobile, SendTime, SmsIrClient, TemplateId, TemplateParameters, VerifySms};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = required_env("SMSIR_API_KEY")?;
    let mobile = required_env("SMSIR_MOBILE")?;
    let template_id = required_env("SMSIR_TEMPLATE_ID")?.trim().parse::<u32>()?;

    // SMSIR_SEND_TIME uses the wire format, e.g. "2030-01-02 03:04:05".
    let send_time = match std::env::var("SMSIR_SEND_TIME") {
        Ok(raw) => SendTime::parse(&raw)?,
        Err(_) => SendTime::new((Local::now() + Duration::hours(1)).naive_local()),
    };

    let client = SmsIrClient::new(ApiKey::new(api_key)?);
    let request = VerifySms::new(
        Mobile::new(mobile)?,
        TemplateId::new(template_id),
        TemplateParameters::single("CODE", "000000")?,
    )
    .at(send_time);

    let response = client.schedule_sms(request).await?;
    println!("scheduled for {send_time}: {response}");

    Ok(())
}
