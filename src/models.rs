use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A tracked wallet address. `address` is the identity key everywhere.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub address: String,
    #[serde(deserialize_with = "decimal_string")]
    pub balance: String,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub last_synced: Option<DateTime<Utc>>,
}

impl Address {
    pub fn new(address: impl Into<String>, balance: impl Into<String>) -> Self {
        Address {
            address: address.into(),
            balance: balance.into(),
            last_synced: None,
        }
    }
}

/// Transaction direction relative to the tracked address
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Incoming,
    Outgoing,
}

impl TxType {
    pub fn as_str(&self) -> &str {
        match self {
            TxType::Incoming => "incoming",
            TxType::Outgoing => "outgoing",
        }
    }
}

/// A single entry of an address's transaction history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub tx_hash: String,
    #[serde(deserialize_with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TxType,
    #[serde(deserialize_with = "decimal_string")]
    pub amount: String,
}

/// Kind of the live status line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    InProgress,
    Success,
    Error,
}

/// Outcome of the most recent mutating operation, shown in the status line
#[derive(Clone, Debug, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn in_progress(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            kind: StatusKind::InProgress,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

// The service stores balances and amounts as floats, so accept either
// a JSON string or a JSON number and keep the decimal text as sent.
#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalRepr {
    Text(String),
    Number(serde_json::Number),
}

fn decimal_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match DecimalRepr::deserialize(deserializer)? {
        DecimalRepr::Text(s) => s,
        DecimalRepr::Number(n) => plain_decimal(&n.to_string()),
    })
}

/// Rewrite exponent notation (`5e-6`, `1.5E3`) as a plain decimal.
/// Anything that is not a well-formed exponent form is returned unchanged.
pub fn plain_decimal(text: &str) -> String {
    let Some((mantissa, exponent)) = text.split_once(|c| c == 'e' || c == 'E') else {
        return text.to_string();
    };
    let Ok(exponent) = exponent.parse::<i64>() else {
        return text.to_string();
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = format!("{}{}", int_part, frac_part);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return text.to_string();
    }

    let point = int_part.len() as i64 + exponent;
    let body = if point <= 0 {
        format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
    } else if point as usize >= digits.len() {
        format!("{}{}", digits, "0".repeat(point as usize - digits.len()))
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{}.{}", whole, fraction)
    };

    let body = body.trim_start_matches('0');
    let body = if body.is_empty() || body.starts_with('.') {
        format!("0{}", body)
    } else {
        body.to_string()
    };
    format!("{}{}", sign, body)
}

/// Parse an ISO-8601 instant. Values without an offset are taken as UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_timestamp(&text)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", text)))
}

fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(text) => parse_timestamp(&text)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", text))),
        None => Ok(None),
    }
}
