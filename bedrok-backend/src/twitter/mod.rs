//! X/Twitter API v2 access: mentions, post lookup and replies.

mod client;
mod oauth;
mod types;

pub use client::TwitterClient;
pub use oauth::{TwitterCredentials, generate_oauth_header, percent_encode};
pub use types::{Mention, ParentPost, Post, REPLIED_TO, ReferencedTweet};

use async_trait::async_trait;
use std::fmt;

/// Maximum weighted length of a standard post
pub const TWITTER_MAX_CHARS: usize = 280;

/// Weight of one char under the platform's length counting: Latin, general
/// punctuation and the like count 1, everything else (CJK, emoji) counts 2.
pub fn char_weight(c: char) -> usize {
    match c as u32 {
        0..=4351 | 8192..=8205 | 8208..=8223 | 8242..=8247 => 1,
        _ => 2,
    }
}

/// Length of `text` as the platform counts it
pub fn weighted_length(text: &str) -> usize {
    text.chars().map(char_weight).sum()
}

/// Failure of a single X API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TwitterError {
    /// The request never produced a response (DNS, TLS, connection reset)
    Transport(String),
    /// Non-2xx response
    Api { status: u16, message: String },
    /// 2xx response carrying an `errors` array and no data
    Platform(String),
    /// Response body did not match the expected shape
    Parse(String),
    /// Response parsed but the expected object was absent
    MissingData(String),
    /// Request could not be signed
    Auth(String),
}

impl TwitterError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, TwitterError::Api { status: 429, .. })
    }
}

impl fmt::Display for TwitterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwitterError::Transport(e) => write!(f, "Request failed: {}", e),
            TwitterError::Api { status, message } => write!(f, "API error ({}): {}", status, message),
            TwitterError::Platform(e) => write!(f, "Twitter API errors: {}", e),
            TwitterError::Parse(e) => write!(f, "Failed to parse response: {}", e),
            TwitterError::MissingData(what) => write!(f, "No {} returned", what),
            TwitterError::Auth(e) => write!(f, "Failed to sign request: {}", e),
        }
    }
}

impl std::error::Error for TwitterError {}

/// The platform calls the bot makes. `TwitterClient` is the live
/// implementation; tests substitute recording mocks.
#[async_trait]
pub trait SocialClient: Send + Sync {
    /// Most recent mentions of `user_id`, newest first
    async fn get_mentions(&self, user_id: &str, max_results: u32) -> Result<Vec<Mention>, TwitterError>;

    /// A single post including its referenced posts
    async fn get_tweet(&self, tweet_id: &str) -> Result<Post, TwitterError>;

    /// Post `text` as a reply to `in_reply_to`, returning the new post id
    async fn create_reply(&self, text: &str, in_reply_to: &str) -> Result<String, TwitterError>;
}
