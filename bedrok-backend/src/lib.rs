//! Bedrok: replies to X/Twitter mentions with a short critique naming the
//! logical fallacy in the post being replied to.

pub mod ai;
pub mod bot;
pub mod config;
pub mod http;
pub mod local;
pub mod twitter;

pub use ai::{CompletionError, CritiqueGenerator, GroqClient};
pub use bot::{MentionOutcome, MentionReport, MentionResponder};
pub use config::Config;
pub use twitter::{SocialClient, TwitterClient, TwitterCredentials, TwitterError};
