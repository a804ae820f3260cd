//! Wire DTOs for the identity and product services.
//!
//! DESIGN
//! ======
//! Both services are third-party, so decoding is lenient where they are
//! known to vary: record ids may be numbers or strings, prices may arrive
//! as numbers or numeric strings, and error bodies carry `message` as a
//! string or a list of strings.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Role assigned to every self-registered account.
///
/// Set client-side with no server-side enforcement visible to this client.
pub const CUSTOMER_ROLE: &str = "customer";

/// Server-assigned record identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// Login request body for `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Login response body. Only `access_token` is read; the service's
/// `refresh_token` is not decoded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Registration body for `POST /users/`. The confirmation field never
/// reaches the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub avatar: String,
    pub role: String,
}

/// A user record from the identity service.
///
/// The service echoes the password; it is dropped on decode so the local
/// user cache never holds it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub role: String,
}

/// A product record from the catalog service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: f64,
    #[serde(default)]
    pub description: String,
}

/// Create body for `POST /products/private`; the price is already numeric.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: String,
}

/// Error body shape shared by both services.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

/// Extract a human-readable message from an error response body.
///
/// Accepts `{"message": "..."}` and `{"message": ["...", "..."]}` (joined
/// with `"; "`). Returns `None` for anything else or blank messages.
pub fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let message = match parsed.message? {
        serde_json::Value::String(text) => text,
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(serde_json::Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };
    let message = message.trim();
    if message.is_empty() { None } else { Some(message.to_owned()) }
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let price = match value {
        serde_json::Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| D::Error::custom("expected finite number"))?,
        serde_json::Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom("expected numeric string"))?,
        _ => return Err(D::Error::custom("expected number")),
    };
    if price.is_finite() {
        Ok(price)
    } else {
        Err(D::Error::custom("expected finite number"))
    }
}
