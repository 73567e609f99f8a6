//! Server-side client for the Stream Chat REST API.
//!
//! Every call is one signed HTTP request: the client adds the `api_key` query
//! parameter, a server-side JWT in `Authorization` and `stream-auth-type: jwt`,
//! then wraps the JSON reply in a [`StreamResponse`] together with its status
//! code and rate-limit headers. Non-2xx replies become [`Error::Api`].
//!
//! # Example
//!
//! ```no_run
//! use serde_json::json;
//! use stream_chat::{SortOption, StreamClient, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = StreamClient::builder()
//!     .api_key("api-key")
//!     .api_secret("api-secret")
//!     .build()?;
//!
//! // Token for a chat user to connect with
//! let token = client.create_token("jane", None, None)?;
//!
//! // Create a channel and post to it
//! let mut channel = client.channel("messaging", Some("general"), None);
//! channel.create("jane", Some(&["jane", "joe"])).await?;
//! channel.send_message(json!({"text": "hi"}), "jane", None).await?;
//!
//! // Query channels, newest first
//! let response = client
//!     .channels()
//!     .query(json!({"members": {"$in": ["jane"]}}), &[SortOption::desc("last_message_at")], None)
//!     .await?;
//! if let Some(limits) = response.rate_limit() {
//!     println!("{} of {} requests left", limits.remaining, limits.limit);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Channels**: [`Channel`] for one channel, [`ChannelBatchUpdater`] for
//!   filter-wide updates, [`StreamClient::channels`] for queries and exports
//! - **Users**, **Messages**, **Moderation**, **Reminders**
//! - **App settings**, **Channel types**, **Blocklists**, **Commands**,
//!   **Devices**, **Permissions**, **Push providers**
//! - **Campaigns**, **Segments**, **Imports**, **Tasks**

pub mod api;
pub mod batch;
pub mod channel;
pub mod client;
pub mod config;
pub mod error;
pub mod response;
pub mod token;
pub mod types;

pub use batch::ChannelBatchUpdater;
pub use channel::Channel;
pub use client::{ClientBuilder, StreamClient};
pub use error::{Error, Result};
pub use response::{RateLimit, RateLimitHeaders, StreamResponse};
pub use token::JwtSigner;
pub use types::*;
