use bon::Builder;
use core::fmt;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::time::Duration;

use crate::timestamp::Timestamp;

/// Parameters for a Network Traversal Service token request.
#[derive(Debug, Clone, Default, Serialize, Builder)]
pub struct TokenRequest {
    /// Requested credential lifetime in seconds. Twilio defaults to 86400
    /// (24 hours) when omitted.
    #[serde(rename = "Ttl", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// A short-lived credential set for NAT traversal, issued per request.
///
/// Immutable after parsing and owned by the caller; nothing is cached or
/// persisted by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    /// Account that requested the token.
    pub account_sid: String,
    /// When the credential set was issued.
    pub date_created: Timestamp,
    /// When the credential set was last updated.
    pub date_updated: Timestamp,
    /// STUN/TURN endpoints usable with these credentials, in server order.
    #[serde(default)]
    pub ice_servers: Vec<IceServer>,
    /// Issued TURN password.
    pub password: String,
    /// Credential lifetime in seconds. Twilio sends this as either a JSON
    /// number or a numeric string; both decode to an integer.
    #[serde(deserialize_with = "deserialize_ttl")]
    pub ttl: u32,
    /// Issued TURN username.
    pub username: String,
}

impl TokenResponse {
    /// Credential lifetime as a [`Duration`].
    #[must_use]
    pub fn ttl_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.ttl))
    }

    /// When the issued credentials expire (`date_created` + `ttl`).
    #[must_use]
    pub fn expires_at(&self) -> Timestamp {
        self.date_created.add_seconds(self.ttl)
    }
}

/// One STUN/TURN endpoint descriptor as provided by the server.
///
/// Every field is optional; STUN entries typically carry no credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IceServer {
    /// TURN credential for this endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
    /// Singular legacy URI field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Current URI field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<String>,
    /// TURN username for this endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl IceServer {
    /// Connection URI, preferring the current `urls` field over the legacy
    /// `url` one.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.urls.as_deref().or(self.url.as_deref())
    }

    /// Whether this entry points at a STUN server (`stun:`/`stuns:` scheme).
    #[must_use]
    pub fn is_stun(&self) -> bool {
        matches!(self.endpoint(), Some(uri) if uri.starts_with("stun:") || uri.starts_with("stuns:"))
    }

    /// Whether this entry points at a TURN relay (`turn:`/`turns:` scheme).
    #[must_use]
    pub fn is_turn(&self) -> bool {
        matches!(self.endpoint(), Some(uri) if uri.starts_with("turn:") || uri.starts_with("turns:"))
    }
}

/// Decode the dual-typed `ttl` field: a JSON unsigned integer directly, or
/// a numeric string trimmed and parsed. Anything else is a decode error.
fn deserialize_ttl<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    /// Visitor for the number-or-numeric-string lifetime field.
    struct TtlVisitor;

    impl<'de> de::Visitor<'de> for TtlVisitor {
        type Value = u32;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a lifetime in seconds as an integer or numeric string")
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(value).map_err(|_| E::custom(format!("ttl {value} is out of range")))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(value).map_err(|_| E::custom(format!("ttl {value} is out of range")))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            value
                .trim()
                .parse::<u32>()
                .map_err(|_| E::custom(format!("ttl {value:?} is not numeric")))
        }
    }

    deserializer.deserialize_any(TtlVisitor)
}
