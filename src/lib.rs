#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Twilio Network Traversal Service API client for Rust
//!
//! The Network Traversal Service issues short-lived ICE/STUN/TURN
//! credentials for WebRTC NAT traversal. This crate covers its single
//! endpoint: one authenticated POST that returns a credential set, with
//! Twilio's custom date format and dual-typed `ttl` field mapped onto
//! plain Rust types.
//!
//! # Example
//!
//! ```rust,no_run
//! use twilio_ox::{TokenRequest, Twilio};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Twilio::load_from_env()?;
//!
//!     let request = TokenRequest::builder().ttl(3600).build();
//!     let token = client.create_token(&request).await?;
//!
//!     println!("credentials valid until {}", token.expires_at());
//!     for server in token.ice_servers.iter().filter(|s| s.is_turn()) {
//!         println!("relay: {}", server.endpoint().unwrap_or("<none>"));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod timestamp;
pub mod token;

// Re-export main types
pub use client::Twilio;
pub use error::{ErrorKind, ErrorResponse, TwilioRequestError};
pub use timestamp::Timestamp;
pub use token::{IceServer, TokenRequest, TokenResponse};
