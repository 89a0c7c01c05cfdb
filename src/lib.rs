//! Typed Rust client for the SMS.ir HTTP API.
//!
//! The crate is split into a domain layer of validated types, a transport layer
//! for endpoint paths and JSON payloads, and a client layer whose single
//! dispatcher issues every request, attaches the API key, and normalizes
//! failures into [`ApiError`].
//!
//! ```rust,no_run
//! use smsir::{ApiKey, Mobile, SmsIrClient, TemplateId, TemplateParameters, VerifySms};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsir::SmsIrError> {
//!     let client = SmsIrClient::new(ApiKey::new("...")?);
//!     let message = VerifySms::new(
//!         Mobile::new("09123456789")?,
//!         TemplateId::new(12345),
//!         TemplateParameters::single("CODE", "000000")?,
//!     );
//!     let _resp = client.send_sms(message).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod logging;
mod transport;

pub use client::{ApiError, BulkSendResults, SmsIrClient, SmsIrClientBuilder, SmsIrError};
pub use domain::{
    ApiKey, LastHours, MessageId, Mobile, PhoneNumber, ScheduledSms, SendTime, SentPage,
    TemplateId, TemplateParameter, TemplateParameters, ValidationError, VerifySms,
};
pub use transport::HttpMethod;
