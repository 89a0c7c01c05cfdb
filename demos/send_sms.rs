use std::io;

use smsir::{ApiKey, PhoneNumber, SmsIrClient, TemplateId, TemplateParameters, VerifySms};

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
    let code = std::env::var("SMSIR_CODE").unwrap_or_else(|_| "000000".to_owned());

    let client = SmsIrClient::new(ApiKey::new(api_key)?);
    // Accepts `0912...` as well as `+98912...`.
    let mobile = PhoneNumber::parse_local(mobile)?;
    println!("sending to {mobile}");

    let message = VerifySms::new(
        mobile.into(),
        TemplateId::new(template_id),
        TemplateParameters::single("CODE", code)?,
    );

    let response = client.send_sms(message).await?;
    println!("response: {response}");

    Ok(())
}
