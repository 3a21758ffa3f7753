//! X API v2 wire types and the transient values the bot passes around.

use serde::Deserialize;

/// A post that mentions the bot account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub id: String,
    pub author_id: String,
    pub text: String,
}

/// A post fetched by id, with the posts it references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub text: String,
    pub referenced_tweets: Vec<ReferencedTweet>,
}

impl Post {
    /// Id of the first post this one is replying to, if any
    pub fn replied_to_id(&self) -> Option<&str> {
        self.referenced_tweets
            .iter()
            .find(|r| r.ref_type == REPLIED_TO)
            .map(|r| r.id.as_str())
    }
}

/// The post a mention is replying to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentPost {
    pub id: String,
    pub text: String,
}

pub const REPLIED_TO: &str = "replied_to";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReferencedTweet {
    #[serde(rename = "type")]
    pub ref_type: String,
    pub id: String,
}

/// `GET /2/users/:id/mentions`
#[derive(Debug, Deserialize)]
pub(crate) struct MentionsResponse {
    pub data: Option<Vec<Tweet>>,
    pub errors: Option<Vec<TwitterApiError>>,
}

/// `GET /2/tweets/:id`
#[derive(Debug, Deserialize)]
pub(crate) struct SingleTweetResponse {
    pub data: Option<Tweet>,
    pub errors: Option<Vec<TwitterApiError>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Tweet {
    pub id: String,
    pub text: String,
    pub author_id: Option<String>,
    pub referenced_tweets: Option<Vec<ReferencedTweet>>,
}

impl From<Tweet> for Mention {
    fn from(tweet: Tweet) -> Self {
        Self {
            id: tweet.id,
            author_id: tweet.author_id.unwrap_or_default(),
            text: tweet.text,
        }
    }
}

impl From<Tweet> for Post {
    fn from(tweet: Tweet) -> Self {
        Self {
            id: tweet.id,
            text: tweet.text,
            referenced_tweets: tweet.referenced_tweets.unwrap_or_default(),
        }
    }
}

/// `POST /2/tweets`
#[derive(Debug, Deserialize)]
pub(crate) struct PostTweetResponse {
    pub data: Option<PostedTweet>,
    pub errors: Option<Vec<TwitterApiError>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostedTweet {
    pub id: String,
    pub text: String,
}

/// Entry of the `errors` array; `detail` carries the reason on v2 problem
/// responses, `message` on older ones.
#[derive(Debug, Deserialize)]
pub(crate) struct TwitterApiError {
    pub message: Option<String>,
    pub detail: Option<String>,
    pub title: Option<String>,
}

impl TwitterApiError {
    pub fn describe(&self) -> String {
        self.detail
            .as_deref()
            .or(self.message.as_deref())
            .or(self.title.as_deref())
            .unwrap_or("unknown error")
            .to_string()
    }
}

/// Top-level problem body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ProblemResponse {
    pub title: Option<String>,
    pub detail: Option<String>,
    pub errors: Option<Vec<TwitterApiError>>,
}

impl ProblemResponse {
    pub fn describe(&self) -> Option<String> {
        if let Some(detail) = &self.detail {
            return Some(detail.clone());
        }
        if let Some(errors) = &self.errors {
            if !errors.is_empty() {
                return Some(join_errors(errors));
            }
        }
        self.title.clone()
    }
}

pub(crate) fn join_errors(errors: &[TwitterApiError]) -> String {
    errors
        .iter()
        .map(TwitterApiError::describe)
        .collect::<Vec<_>>()
        .join("; ")
}
