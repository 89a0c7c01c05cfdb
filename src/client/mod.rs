//! Client layer: the dispatcher every remote call flows through, plus the
//! business operations built on it.

mod error;

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::domain::{
    ApiKey, LastHours, MessageId, Mobile, ScheduledSms, SentPage, TemplateId, TemplateParameters,
    ValidationError, VerifySms,
};
use crate::transport::{self, Endpoint, HttpMethod, TransportError};

pub use error::{ApiError, SmsIrError};

const DEFAULT_BASE_URL: &str = "https://api.sms.ir/v1/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CONTENT_TYPE_JSON: &str = "application/json";
const ACCEPT_PLAIN_TEXT: &str = "text/plain";

const BODY_SNIPPET_MAX: usize = 500;

/// Per-recipient outcome of a bulk send, keyed by recipient.
///
/// If a recipient appears more than once, its slot holds the outcome of the last call.
pub type BulkSendResults = BTreeMap<Mobile, Result<Value, SmsIrError>>;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: Url,
    headers: Vec<(&'static str, String)>,
    body: Option<Value>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(request.method.into(), request.url)
                .timeout(self.timeout);
            for (name, value) in request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body.as_ref() {
                builder = builder.json(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Builder for [`SmsIrClient`].
///
/// Use this when you need to customize the base URL, timeouts, or user-agent.
pub struct SmsIrClientBuilder {
    api_key: ApiKey,
    base_url: String,
    timeout: Duration,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SmsIrClientBuilder {
    /// Create a builder with the production base URL and the 10 second timeout.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: None,
            user_agent: None,
        }
    }

    /// Override the base URL every endpoint path is joined to.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout applied to each whole request (connect + response).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a separate, usually shorter, bound on establishing the connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`SmsIrClient`].
    pub fn build(self) -> Result<SmsIrClient, SmsIrError> {
        let base_url = normalize_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SmsIrError::ClientBuild(Box::new(err)))?;

        Ok(SmsIrClient {
            api_key: self.api_key,
            base_url,
            http: Arc::new(ReqwestTransport {
                client,
                timeout: self.timeout,
            }),
        })
    }
}

#[derive(Clone)]
/// High-level SMS.ir client.
///
/// Every operation is a single request issued through [`SmsIrClient::dispatch`],
/// which attaches the API key, bounds the wait, and normalizes failures into
/// [`ApiError`]. The default base URL is `https://api.sms.ir/v1/`.
pub struct SmsIrClient {
    api_key: ApiKey,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for SmsIrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsIrClient")
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SmsIrClient {
    /// Create a client using the default base URL and timeout.
    ///
    /// For more customization, use [`SmsIrClient::builder`].
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
                timeout: DEFAULT_TIMEOUT,
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey) -> SmsIrClientBuilder {
        SmsIrClientBuilder::new(api_key)
    }

    /// Base URL endpoint paths are joined to (always ends with `/`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one request against `path` (relative to the base URL) and return the
    /// decoded JSON body verbatim.
    ///
    /// Every request carries `Content-Type: application/json`, `Accept: text/plain`
    /// and the `x-api-key` header. There are no retries.
    ///
    /// Errors:
    /// - status code absent: the path is not a relative path, the exchange failed
    ///   (DNS, refused connection, timeout), or a 2xx body is not JSON;
    /// - status code set: the service answered with a non-2xx status.
    ///
    /// Every failure is logged at `ERROR` with the target URL and the cause.
    pub async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = self.endpoint_url(path)?;

        let request = HttpRequest {
            method,
            url: url.clone(),
            headers: self.request_headers(),
            body,
        };

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                let cause = describe_error(err.as_ref());
                tracing::error!(%url, %method, "request to {url} failed: {cause}");
                return Err(ApiError::transport(format!("API request failed: {cause}")));
            }
        };

        if !(200..=299).contains(&response.status) {
            let cause = describe_status(response.status, &url, &response.body);
            tracing::error!(
                %url,
                %method,
                status = response.status,
                "request to {url} failed: {cause}"
            );
            return Err(ApiError::rejected(
                response.status,
                format!("API request failed: {cause}"),
            ));
        }

        serde_json::from_str(&response.body).map_err(|err| {
            let snippet = truncate_body(&response.body);
            tracing::error!(
                %url,
                %method,
                "request to {url} failed: invalid JSON response: {err} | body: {snippet}"
            );
            ApiError::transport(format!("API request failed: invalid JSON response: {err}"))
        })
    }

    /// Send a template-based (verification) message to one recipient.
    pub async fn send_sms(&self, message: VerifySms) -> Result<Value, SmsIrError> {
        let endpoint = transport::encode_send_verify(&message).map_err(encode_error)?;
        let response = self.call(endpoint).await?;
        tracing::info!(
            mobile = %message.mobile(),
            "SMS sent to {}. response: {response}",
            message.mobile()
        );
        Ok(response)
    }

    /// Send a template message whose variables are given as ordered `(name, value)` pairs.
    ///
    /// The parameter list is validated before anything is sent.
    pub async fn send_sms_with_custom_template<I, N, V>(
        &self,
        mobile: Mobile,
        template_id: TemplateId,
        parameters: I,
    ) -> Result<Value, SmsIrError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: ToString,
    {
        let parameters = TemplateParameters::from_pairs(parameters)?;
        self.send_sms(VerifySms::new(mobile, template_id, parameters))
            .await
    }

    /// Send the same template and parameters to each recipient, one call at a time.
    ///
    /// A failure for one recipient does not stop the others; it lands in that
    /// recipient's slot.
    pub async fn send_bulk_sms(
        &self,
        mobiles: Vec<Mobile>,
        template_id: TemplateId,
        parameters: TemplateParameters,
    ) -> BulkSendResults {
        let messages = mobiles
            .into_iter()
            .map(|mobile| VerifySms::new(mobile, template_id, parameters.clone()))
            .collect();
        self.send_bulk_sms_with_different_values(messages).await
    }

    /// Send a list of independent messages (each with its own template and values),
    /// one call at a time.
    pub async fn send_bulk_sms_with_different_values(
        &self,
        messages: Vec<VerifySms>,
    ) -> BulkSendResults {
        let mut results = BulkSendResults::new();
        for message in messages {
            let mobile = message.mobile().clone();
            let outcome = self.send_sms(message).await;
            results.insert(mobile, outcome);
        }

        let failed = results.values().filter(|outcome| outcome.is_err()).count();
        tracing::info!(
            recipients = results.len(),
            failed,
            "bulk send finished: {} recipients, {failed} failed",
            results.len()
        );
        results
    }

    /// Schedule a template message for delivery at [`ScheduledSms::send_time`].
    pub async fn schedule_sms(&self, request: ScheduledSms) -> Result<Value, SmsIrError> {
        let endpoint = transport::encode_send_schedule(&request).map_err(encode_error)?;
        let response = self.call(endpoint).await?;
        tracing::info!(
            mobile = %request.message().mobile(),
            "SMS scheduled for {}. response: {response}",
            request.send_time()
        );
        Ok(response)
    }

    /// Cancel a previously scheduled message.
    pub async fn cancel_scheduled_sms(&self, message_id: &MessageId) -> Result<Value, SmsIrError> {
        let response = self
            .call(transport::encode_cancel_scheduled(message_id))
            .await?;
        tracing::info!(%message_id, "scheduled SMS {message_id} cancelled. response: {response}");
        Ok(response)
    }

    /// Current `status` of a sent message; `None` if the service did not report one.
    pub async fn get_sms_status(&self, message_id: &MessageId) -> Result<Option<Value>, SmsIrError> {
        let response = self.call(transport::encode_sms_status(message_id)).await?;
        let status = transport::decode_status_response(&response);
        tracing::info!(%message_id, "status of SMS {message_id}: {status:?}");
        Ok(status)
    }

    /// One page of sent messages; empty when the response has no `messages`.
    pub async fn get_sent_messages(&self, page: SentPage) -> Result<Vec<Value>, SmsIrError> {
        let response = self.call(transport::encode_sent_messages(page)).await?;
        let messages = transport::decode_messages_response(&response);
        tracing::info!(
            "fetched {} sent messages from page {}",
            messages.len(),
            page.page()
        );
        Ok(messages)
    }

    /// Delivery `status` of a sent message; `None` if the service did not report one.
    pub async fn get_delivery_report(
        &self,
        message_id: &MessageId,
    ) -> Result<Option<Value>, SmsIrError> {
        let response = self
            .call(transport::encode_delivery_report(message_id))
            .await?;
        let status = transport::decode_status_response(&response);
        tracing::info!(%message_id, "delivery report of SMS {message_id}: {status:?}");
        Ok(status)
    }

    /// Messages sent within the last `hours`; empty when the response has no `messages`.
    pub async fn get_recent_sms_reports(&self, hours: LastHours) -> Result<Vec<Value>, SmsIrError> {
        let response = self.call(transport::encode_recent_reports(hours)).await?;
        let messages = transport::decode_messages_response(&response);
        tracing::info!(
            "fetched {} reports from the last {} hours",
            messages.len(),
            hours.value()
        );
        Ok(messages)
    }

    /// Ask the service which of `numbers` are blocked or inactive.
    ///
    /// An empty list is rejected before anything is sent.
    pub async fn check_invalid_numbers(&self, numbers: &[Mobile]) -> Result<Vec<Value>, SmsIrError> {
        if numbers.is_empty() {
            return Err(ValidationError::Empty { field: "numbers" }.into());
        }
        let endpoint = transport::encode_check_invalid_numbers(numbers).map_err(encode_error)?;
        let response = self.call(endpoint).await?;
        let invalid = transport::decode_invalid_numbers_response(&response);
        let shown = serde_json::Value::Array(invalid.clone());
        tracing::info!(checked = numbers.len(), "invalid numbers: {shown}");
        Ok(invalid)
    }

    /// Send a test message that does not consume panel credit.
    pub async fn send_test_sms(&self, message: VerifySms) -> Result<Value, SmsIrError> {
        let endpoint = transport::encode_send_test(&message).map_err(encode_error)?;
        let response = self.call(endpoint).await?;
        tracing::info!(
            mobile = %message.mobile(),
            "test SMS sent to {}. response: {response}",
            message.mobile()
        );
        Ok(response)
    }

    /// Remaining panel credit; `None` if the response has no `credit`.
    pub async fn check_credit(&self) -> Result<Option<Value>, SmsIrError> {
        let response = self.call(transport::encode_check_credit()).await?;
        let credit = transport::decode_credit_response(&response);
        tracing::info!("panel credit: {credit:?}");
        Ok(credit)
    }

    async fn call(&self, endpoint: Endpoint) -> Result<Value, SmsIrError> {
        let response = self
            .dispatch(endpoint.method, &endpoint.path, endpoint.body)
            .await?;
        Ok(response)
    }

    fn request_headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", CONTENT_TYPE_JSON.to_owned()),
            ("Accept", ACCEPT_PLAIN_TEXT.to_owned()),
            (ApiKey::FIELD, self.api_key.as_str().to_owned()),
        ]
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, ApiError> {
        let reject = |reason: String| {
            tracing::error!(base_url = %self.base_url, path, "request not sent: {reason}");
            ApiError::transport(format!("API request failed: {reason}"))
        };

        if path.trim().is_empty() {
            return Err(reject("endpoint path must not be empty".to_owned()));
        }
        if path.starts_with('/') || Url::parse(path).is_ok() {
            return Err(reject(format!("endpoint path must be relative: {path}")));
        }

        Url::parse(&self.base_url)
            .and_then(|base| base.join(path))
            .map_err(|err| reject(format!("invalid endpoint URL for {path}: {err}")))
    }
}

fn normalize_base_url(base_url: &str) -> Result<String, SmsIrError> {
    let mut url = Url::parse(base_url.trim())?;
    if url.cannot_be_a_base() {
        return Err(SmsIrError::InvalidBaseUrl(
            url::ParseError::RelativeUrlWithCannotBeABaseBase,
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url.into())
}

fn encode_error(err: TransportError) -> SmsIrError {
    SmsIrError::Encode(Box::new(err))
}

/// Render an error and its source chain as `outer: inner: ...`.
fn describe_error(err: &(dyn StdError + 'static)) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !description.contains(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        source = cause.source();
    }
    description
}

fn describe_status(status: u16, url: &Url, body: &str) -> String {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown Status");
    let kind = match status {
        400..=499 => "Client Error",
        500..=599 => "Server Error",
        _ => "Unexpected Status",
    };
    let mut cause = format!("{status} {kind}: {reason} for url: {url}");
    if !body.trim().is_empty() {
        cause.push_str(" | body: ");
        cause.push_str(&truncate_body(body));
    }
    cause
}

fn truncate_body(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(BODY_SNIPPET_MAX) {
        Some((cut, _)) => format!("{}...[truncated]", &body[..cut]),
        None => body.to_owned(),
    }
}
