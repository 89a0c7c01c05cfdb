use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use phonenumber::country;

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// SMS.ir API key, sent as the `x-api-key` header on every request.
///
/// Invariant: non-empty after trimming. `Debug` output never contains the key.
pub struct ApiKey(String);

impl ApiKey {
    /// Header name used by SMS.ir (`x-api-key`).
    pub const FIELD: &'static str = "x-api-key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient mobile number as sent to SMS.ir (`mobile`).
///
/// Invariant: non-empty after trimming. This type does not normalize; parse into
/// [`PhoneNumber`] and convert if you want E.164.
pub struct Mobile(String);

impl Mobile {
    /// Body field name used by SMS.ir (`mobile`).
    pub const FIELD: &'static str = "mobile";

    /// Create a validated (non-empty) mobile number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to SMS.ir.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Mobile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PhoneNumber> for Mobile {
    fn from(value: PhoneNumber) -> Self {
        Self(value.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A number checked by `phonenumber` and held in E.164 form (`+989123456789`).
///
/// Converts into a [`Mobile`] for sending.
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Region assumed by [`PhoneNumber::parse_local`]; SMS.ir delivers to Iranian numbers.
    pub const LOCAL_REGION: country::Id = country::Id::IR;

    /// Parse `input`, using `default_region` when it has no `+<country>` prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        let input = input.as_ref().trim();
        if input.is_empty() {
            return Err(ValidationError::Empty {
                field: Mobile::FIELD,
            });
        }
        let parsed = phonenumber::parse(default_region, input).map_err(|_| {
            ValidationError::InvalidPhoneNumber {
                input: input.to_owned(),
            }
        })?;
        Ok(Self(
            phonenumber::format(&parsed)
                .mode(phonenumber::Mode::E164)
                .to_string(),
        ))
    }

    /// Parse a number written the local way, e.g. `09123456789`.
    pub fn parse_local(input: impl AsRef<str>) -> Result<Self, ValidationError> {
        Self::parse(Some(Self::LOCAL_REGION), input)
    }

    pub fn e164(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identifier of a message template registered in the SMS.ir panel (`templateId`).
pub struct TemplateId(u32);

impl TemplateId {
    /// Body field name used by SMS.ir (`templateId`).
    pub const FIELD: &'static str = "templateId";

    /// Create a template id (no range validation is performed).
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the underlying id.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// A single named template variable (`{"name": ..., "value": ...}`).
///
/// Invariant: the name is non-empty after trimming. The value is kept as provided.
pub struct TemplateParameter {
    name: String,
    value: String,
}

impl TemplateParameter {
    /// Field name used for the variable name (`name`).
    pub const FIELD: &'static str = "name";

    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self {
            name: trimmed.to_owned(),
            value: value.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Ordered, non-empty list of template variables (`parameters`).
pub struct TemplateParameters(Vec<TemplateParameter>);

impl TemplateParameters {
    /// Body field name used by SMS.ir (`parameters`).
    pub const FIELD: &'static str = "parameters";

    /// Create a validated, non-empty parameter list. Order is preserved on the wire.
    pub fn new(parameters: Vec<TemplateParameter>) -> Result<Self, ValidationError> {
        if parameters.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(parameters))
    }

    /// Build parameters from ordered `(name, value)` pairs.
    ///
    /// Values are stringified with [`ToString`], so numeric codes can be passed directly.
    pub fn from_pairs<I, N, V>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: ToString,
    {
        let parameters = pairs
            .into_iter()
            .map(|(name, value)| TemplateParameter::new(name, value.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parameters)
    }

    /// Shortcut for the common single-variable template.
    pub fn single(name: impl Into<String>, value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(vec![TemplateParameter::new(name, value)?]))
    }

    pub fn as_slice(&self) -> &[TemplateParameter] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identifier of a sent or scheduled message, used as a path segment.
///
/// Invariant: non-empty after trimming and made only of ASCII letters, digits, `-`
/// and `_`, so it is always one literal path segment.
pub struct MessageId(String);

impl MessageId {
    pub const FIELD: &'static str = "message_id";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        {
            return Err(ValidationError::InvalidMessageId {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Scheduled send time (`sendDateTime`), rendered as `YYYY-MM-DD HH:MM:SS`.
pub struct SendTime(NaiveDateTime);

impl SendTime {
    /// Body field name used by SMS.ir (`sendDateTime`).
    pub const FIELD: &'static str = "sendDateTime";

    /// `chrono` format string of the wire representation.
    pub const FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    const EXPECTED: &'static str = "YYYY-MM-DD HH:MM:SS";

    pub fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    /// Parse a `YYYY-MM-DD HH:MM:SS` string. Anything else is rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        NaiveDateTime::parse_from_str(input.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidSendTime {
                input: input.to_owned(),
                expected: Self::EXPECTED,
            })
    }

    pub fn value(self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for SendTime {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl FromStr for SendTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SendTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Page selector for the sent-messages listing (`page`, `per_page`).
///
/// Invariant: both values are at least 1.
pub struct SentPage {
    page: u32,
    per_page: u32,
}

impl SentPage {
    pub const PAGE_FIELD: &'static str = "page";
    pub const PER_PAGE_FIELD: &'static str = "per_page";

    pub const DEFAULT_PER_PAGE: u32 = 10;

    pub fn new(page: u32, per_page: u32) -> Result<Self, ValidationError> {
        if page < 1 {
            return Err(ValidationError::BelowMinimum {
                field: Self::PAGE_FIELD,
                min: 1,
                actual: page,
            });
        }
        if per_page < 1 {
            return Err(ValidationError::BelowMinimum {
                field: Self::PER_PAGE_FIELD,
                min: 1,
                actual: per_page,
            });
        }
        Ok(Self { page, per_page })
    }

    pub fn page(self) -> u32 {
        self.page
    }

    pub fn per_page(self) -> u32 {
        self.per_page
    }
}

impl Default for SentPage {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Reporting window for recent message reports (`last_hours`).
///
/// Invariant: at least 1 hour.
pub struct LastHours(u32);

impl LastHours {
    pub const FIELD: &'static str = "last_hours";

    pub const DEFAULT: u32 = 24;

    pub fn new(hours: u32) -> Result<Self, ValidationError> {
        if hours < 1 {
            return Err(ValidationError::BelowMinimum {
                field: Self::FIELD,
                min: 1,
                actual: hours,
            });
        }
        Ok(Self(hours))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for LastHours {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}
