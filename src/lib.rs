//! Typed Rust client for the Vonage communications APIs.
//!
//! Requests are built through staged builders that validate on `create()` and return a
//! [`ValidationError`] describing the first failed rule. A validated request renders its own
//! path, query string and body through [`VonageRequest`]; [`VonageClient`] attaches
//! credentials and sends it.
//!
//! ```rust,no_run
//! use vonage::{Credentials, FetchOrder, GetUserConversationsRequest, VonageClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vonage::VonageError> {
//!     let client = VonageClient::new(Credentials::api_key_secret("key", "secret")?);
//!     let request = GetUserConversationsRequest::build()
//!         .with_user_id("USR-123")
//!         .with_order(FetchOrder::Descending)
//!         .create()?;
//!     let page = client.send(&request).await?;
//!     println!("{} conversations", page.conversations().len());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Credentials, VonageClient, VonageClientBuilder, VonageError};
pub use domain::{
    CallCompleted, Color, CreateUserRequest, EmbeddedConversations, FetchOrder,
    GetConversationRequest, GetDialNumbersRequest, GetUserConversationsRequest, InputEvaluation,
    MemberState, PhoneNumber, Psd2Request, UpdateApplicationRequest, UpdateThemeRequest,
    UserConversations, ValidationError, ValidationErrorKind, VerifyCheckRequest, VerifyCommand,
    VerifyControlRequest, VerifyRequest, VerifySearchRequest, VerifyWorkflow, VonageRequest,
};
