use chrono::{TimeZone, Utc};
use twilio_ox::{IceServer, TokenRequest, TokenResponse};

/// Success body in the shape documented for the Tokens endpoint, with the
/// quoted form of `ttl`.
const SUCCESS_BODY: &str = r#"{
    "account_sid": "AC25aa00521bfac6d667f13fec086072df",
    "date_created": "Tue, 26 Jul 2016 19:42:17 +0000",
    "date_updated": "Tue, 26 Jul 2016 19:42:17 +0000",
    "ice_servers": [
        {
            "url": "stun:global.stun.twilio.com:3478?transport=udp",
            "urls": "stun:global.stun.twilio.com:3478?transport=udp"
        },
        {
            "credential": "5SR2x8mZK1lTFJW3NVgLGR0tt9jO8m10aJMfJp7WX9w=",
            "url": "turn:global.turn.twilio.com:3478?transport=udp",
            "urls": "turn:global.turn.twilio.com:3478?transport=udp",
            "username": "dc2d2894d5a9023620c467b0e71cfa6a35457e6679785ed6ae9856fe5bdfa269"
        }
    ],
    "password": "5SR2x8mZK1lTFJW3NVgLGR0tt9jO8m10aJMfJp7WX9w=",
    "ttl": "86400",
    "username": "dc2d2894d5a9023620c467b0e71cfa6a35457e6679785ed6ae9856fe5bdfa269"
}"#;

#[test]
fn test_parse_documented_success_body() {
    let token: TokenResponse =
        serde_json::from_str(SUCCESS_BODY).expect("documented body should parse");

    assert_eq!(token.account_sid, "AC25aa00521bfac6d667f13fec086072df");
    assert_eq!(
        token.date_created.to_utc(),
        Utc.with_ymd_and_hms(2016, 7, 26, 19, 42, 17).unwrap()
    );
    assert_eq!(token.date_created, token.date_updated);
    assert_eq!(token.ttl, 86400);
    assert_eq!(
        token.username,
        "dc2d2894d5a9023620c467b0e71cfa6a35457e6679785ed6ae9856fe5bdfa269"
    );
    assert_eq!(token.password, "5SR2x8mZK1lTFJW3NVgLGR0tt9jO8m10aJMfJp7WX9w=");

    assert_eq!(token.ice_servers.len(), 2);
    let stun = &token.ice_servers[0];
    assert!(stun.is_stun());
    assert!(stun.credential.is_none());
    let turn = &token.ice_servers[1];
    assert!(turn.is_turn());
    assert_eq!(
        turn.credential.as_deref(),
        Some("5SR2x8mZK1lTFJW3NVgLGR0tt9jO8m10aJMfJp7WX9w=")
    );
}

#[test]
fn test_ttl_accepts_bare_number() {
    let body = SUCCESS_BODY.replace("\"ttl\": \"86400\"", "\"ttl\": 86400");
    let token: TokenResponse = serde_json::from_str(&body).expect("numeric ttl should parse");
    assert_eq!(token.ttl, 86400);
}

#[test]
fn test_ttl_rejects_non_numeric_content() {
    let body = SUCCESS_BODY.replace("\"ttl\": \"86400\"", "\"ttl\": \"1 day\"");
    assert!(serde_json::from_str::<TokenResponse>(&body).is_err());

    let body = SUCCESS_BODY.replace("\"ttl\": \"86400\"", "\"ttl\": 86400.5");
    assert!(serde_json::from_str::<TokenResponse>(&body).is_err());

    let body = SUCCESS_BODY.replace("\"ttl\": \"86400\"", "\"ttl\": -1");
    assert!(serde_json::from_str::<TokenResponse>(&body).is_err());
}

#[test]
fn test_date_outside_fixed_format_fails_parse() {
    let body = SUCCESS_BODY.replace(
        "\"date_created\": \"Tue, 26 Jul 2016 19:42:17 +0000\"",
        "\"date_created\": \"2016-07-26T19:42:17Z\"",
    );
    assert!(serde_json::from_str::<TokenResponse>(&body).is_err());

    let body = SUCCESS_BODY.replace(
        "\"date_created\": \"Tue, 26 Jul 2016 19:42:17 +0000\"",
        "\"date_created\": 1469562137",
    );
    assert!(serde_json::from_str::<TokenResponse>(&body).is_err());
}

#[test]
fn test_unknown_keys_are_ignored() {
    let body = SUCCESS_BODY.replace(
        "\"account_sid\":",
        "\"uri\": \"/2010-04-01/Accounts/AC25aa00521bfac6d667f13fec086072df/Tokens.json\",\n    \"account_sid\":",
    );
    let token: TokenResponse = serde_json::from_str(&body).expect("extra keys should be ignored");
    assert_eq!(token.ttl, 86400);
}

#[test]
fn test_missing_ice_servers_defaults_to_empty() {
    let body = r#"{
        "account_sid": "AC25aa00521bfac6d667f13fec086072df",
        "date_created": "Tue, 26 Jul 2016 19:42:17 +0000",
        "date_updated": "Tue, 26 Jul 2016 19:42:17 +0000",
        "password": "secret",
        "ttl": 600,
        "username": "user"
    }"#;
    let token: TokenResponse = serde_json::from_str(body).expect("body without servers parses");
    assert!(token.ice_servers.is_empty());
}

#[test]
fn test_round_trip_preserves_field_values() {
    let token: TokenResponse = serde_json::from_str(SUCCESS_BODY).unwrap();
    let serialized = serde_json::to_string(&token).unwrap();
    let reparsed: TokenResponse = serde_json::from_str(&serialized).unwrap();
    assert_eq!(reparsed, token);

    // The dates go back out in the wire format, not ISO 8601.
    assert!(serialized.contains("Tue, 26 Jul 2016 19:42:17 +0000"));
}

#[test]
fn test_ice_server_endpoint_prefers_urls() {
    let server = IceServer {
        url: Some("turn:legacy.example.com:3478".to_string()),
        urls: Some("turn:current.example.com:3478".to_string()),
        ..IceServer::default()
    };
    assert_eq!(server.endpoint(), Some("turn:current.example.com:3478"));

    let legacy_only = IceServer {
        url: Some("stun:legacy.example.com:3478".to_string()),
        ..IceServer::default()
    };
    assert_eq!(legacy_only.endpoint(), Some("stun:legacy.example.com:3478"));
    assert!(legacy_only.is_stun());
    assert!(!legacy_only.is_turn());

    assert_eq!(IceServer::default().endpoint(), None);
    assert!(!IceServer::default().is_stun());
}

#[test]
fn test_token_request_builder() {
    let request = TokenRequest::builder().ttl(3600).build();
    assert_eq!(request.ttl, Some(3600));

    let request = TokenRequest::builder().build();
    assert_eq!(request.ttl, None);

    assert_eq!(TokenRequest::default().ttl, None);
}

#[test]
fn test_expires_at_adds_ttl() {
    let token: TokenResponse = serde_json::from_str(SUCCESS_BODY).unwrap();
    assert_eq!(
        token.expires_at().to_utc(),
        Utc.with_ymd_and_hms(2016, 7, 27, 19, 42, 17).unwrap()
    );
    assert_eq!(token.ttl_duration(), std::time::Duration::from_secs(86400));
}
