use std::io;

use smsir::{ApiKey, SmsIrClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("SMSIR_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSIR_API_KEY environment variable is required",
        )
    })?;

    let client = SmsIrClient::new(ApiKey::new(api_key)?);
    match client.check_credit().await? {
        Some(credit) => println!("credit: {credit}"),
        None => println!("credit: not reported"),
    }

    Ok(())
}
