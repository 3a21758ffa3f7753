use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::oauth::{TwitterCredentials, generate_oauth_header};
use super::types::{
    MentionsResponse, PostTweetResponse, ProblemResponse, SingleTweetResponse, join_errors,
};
use super::{Mention, Post, SocialClient, TwitterError};
use crate::config::{Config, defaults};

/// Live X API v2 client.
///
/// Reads use app-only Bearer auth; posting uses OAuth 1.0a user context.
#[derive(Clone)]
pub struct TwitterClient {
    client: Client,
    api_base: String,
    bearer_token: String,
    credentials: TwitterCredentials,
}

impl TwitterClient {
    pub fn new(bearer_token: String, credentials: TwitterCredentials) -> Self {
        Self {
            client: crate::http::shared_client().clone(),
            api_base: defaults::TWITTER_API_BASE.to_string(),
            bearer_token,
            credentials,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.twitter_bearer_token.clone(),
            TwitterCredentials::new(
                config.twitter_api_key.clone(),
                config.twitter_api_secret.clone(),
                config.twitter_access_token.clone(),
                config.twitter_access_secret.clone(),
            ),
        )
        .with_api_base(&config.twitter_api_base)
    }

    /// Point the client at a different API root (e.g. `http://127.0.0.1:8080/2`)
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn bearer_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, TwitterError> {
        let url = format!("{}{}", self.api_base, path);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(params)
            .send()
            .await
            .map_err(|e| TwitterError::Transport(e.to_string()))?;

        read_json(response, path).await
    }
}

/// Check the status, then parse the body; non-2xx bodies are mined for the
/// platform's problem description.
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    path: &str,
) -> Result<T, TwitterError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TwitterError::Transport(e.to_string()))?;

    log::debug!("Twitter {} response ({}): {}", path, status, body);

    if !status.is_success() {
        let message = serde_json::from_str::<ProblemResponse>(&body)
            .ok()
            .and_then(|p| p.describe())
            .unwrap_or(body);
        return Err(TwitterError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| TwitterError::Parse(e.to_string()))
}

#[async_trait]
impl SocialClient for TwitterClient {
    async fn get_mentions(&self, user_id: &str, max_results: u32) -> Result<Vec<Mention>, TwitterError> {
        // The endpoint accepts 5..=100
        let max_results = max_results.clamp(5, 100).to_string();
        let path = format!("/users/{}/mentions", user_id);

        let data: MentionsResponse = self
            .bearer_get(
                &path,
                &[("max_results", max_results.as_str()), ("tweet.fields", "author_id")],
            )
            .await?;

        match (data.data, data.errors) {
            (Some(tweets), _) => Ok(tweets.into_iter().map(Mention::from).collect()),
            (None, Some(errors)) if !errors.is_empty() => {
                Err(TwitterError::Platform(join_errors(&errors)))
            }
            // result_count == 0
            (None, _) => Ok(Vec::new()),
        }
    }

    async fn get_tweet(&self, tweet_id: &str) -> Result<Post, TwitterError> {
        let path = format!("/tweets/{}", tweet_id);

        let data: SingleTweetResponse = self
            .bearer_get(&path, &[("tweet.fields", "referenced_tweets,author_id")])
            .await?;

        match (data.data, data.errors) {
            (Some(tweet), _) => Ok(Post::from(tweet)),
            (None, Some(errors)) if !errors.is_empty() => {
                Err(TwitterError::Platform(join_errors(&errors)))
            }
            (None, _) => Err(TwitterError::MissingData(format!("tweet {}", tweet_id))),
        }
    }

    async fn create_reply(&self, text: &str, in_reply_to: &str) -> Result<String, TwitterError> {
        let url = format!("{}/tweets", self.api_base);
        // JSON bodies are not part of the OAuth signature
        let auth_header = generate_oauth_header("POST", &url, &self.credentials, None)?;

        let body = serde_json::json!({
            "text": text,
            "reply": {
                "in_reply_to_tweet_id": in_reply_to
            }
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", auth_header)
            .json(&body)
            .send()
            .await
            .map_err(|e| TwitterError::Transport(e.to_string()))?;

        let data: PostTweetResponse = read_json(response, "/tweets").await?;

        if let Some(errors) = data.errors {
            if data.data.is_none() && !errors.is_empty() {
                return Err(TwitterError::Platform(join_errors(&errors)));
            }
        }

        data.data
            .map(|tweet| {
                log::info!(
                    "Twitter: Posted tweet {} - {}",
                    tweet.id,
                    preview(&tweet.text, 50)
                );
                tweet.id
            })
            .ok_or_else(|| TwitterError::MissingData("tweet data".to_string()))
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}
