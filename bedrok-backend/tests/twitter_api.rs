//! X API v2 client and a full pass against a mock server.

use bedrok::bot::{MentionOutcome, MentionResponder, ResponderSettings};
use bedrok::{CompletionError, CritiqueGenerator, SocialClient, TwitterClient, TwitterCredentials, TwitterError};
use async_trait::async_trait;
use serde_json::{Value, json};
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

const BOT_ID: &str = "999";

fn client_for(server: &MockServer) -> TwitterClient {
    client_at(&server.uri())
}

fn client_at(base: &str) -> TwitterClient {
    TwitterClient::new(
        "test-bearer".to_string(),
        TwitterCredentials::new(
            "consumer-key".to_string(),
            "consumer-secret".to_string(),
            "access-token".to_string(),
            "access-secret".to_string(),
        ),
    )
    .with_api_base(&format!("{}/2", base))
}

async fn mount_tweet(server: &MockServer, id: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/2/tweets/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

struct FixedCritic(&'static str);

#[async_trait]
impl CritiqueGenerator for FixedCritic {
    async fn critique(&self, _post_text: &str) -> Result<String, CompletionError> {
        Ok(self.0.to_string())
    }
}

#[tokio::test]
async fn mentions_request_uses_bearer_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/999/mentions"))
        .and(query_param("max_results", "5"))
        .and(query_param("tweet.fields", "author_id"))
        .and(header("authorization", "Bearer test-bearer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "20", "text": "@bedrok thoughts?", "author_id": "200"},
                {"id": "19", "text": "@bedrok me again", "author_id": "999"}
            ],
            "meta": {"result_count": 2, "newest_id": "20", "oldest_id": "19"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mentions = client_for(&server).get_mentions(BOT_ID, 5).await.unwrap();

    assert_eq!(mentions.len(), 2);
    assert_eq!(mentions[0].id, "20");
    assert_eq!(mentions[0].author_id, "200");
    assert_eq!(mentions[1].author_id, BOT_ID);
}

#[tokio::test]
async fn no_mentions_is_empty_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/999/mentions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"meta": {"result_count": 0}})))
        .mount(&server)
        .await;

    let mentions = client_for(&server).get_mentions(BOT_ID, 5).await;

    assert_eq!(mentions, Ok(Vec::new()));
}

#[tokio::test]
async fn unauthorized_mentions_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/999/mentions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "title": "Unauthorized",
            "type": "about:blank",
            "status": 401,
            "detail": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).get_mentions(BOT_ID, 5).await;

    assert_eq!(
        result,
        Err(TwitterError::Api {
            status: 401,
            message: "Unauthorized".to_string()
        })
    );
}

#[tokio::test]
async fn deleted_tweet_is_platform_error() {
    let server = MockServer::start().await;

    mount_tweet(
        &server,
        "404",
        json!({
            "errors": [{
                "value": "404",
                "detail": "Could not find tweet with id: [404].",
                "title": "Not Found Error",
                "resource_type": "tweet"
            }]
        }),
    )
    .await;

    let result = client_for(&server).get_tweet("404").await;

    assert_eq!(
        result,
        Err(TwitterError::Platform("Could not find tweet with id: [404].".to_string()))
    );
}

#[tokio::test]
async fn reply_is_signed_and_threaded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"id": "30", "text": "🧠 Straw man."}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply_id = client_for(&server).create_reply("🧠 Straw man.", "20").await;
    assert_eq!(reply_id, Ok("30".to_string()));

    let requests = server.received_requests().await.unwrap();
    let auth = requests[0]
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(auth.starts_with("OAuth "));
    assert!(auth.contains("oauth_consumer_key=\"consumer-key\""));
    assert!(auth.contains("oauth_token=\"access-token\""));

    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(
        body,
        json!({"text": "🧠 Straw man.", "reply": {"in_reply_to_tweet_id": "20"}})
    );
}

#[tokio::test]
async fn duplicate_reply_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "You are not allowed to create a Tweet with duplicate content.",
            "type": "about:blank",
            "title": "Forbidden",
            "status": 403
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).create_reply("🧠 Straw man.", "20").await;

    assert_eq!(
        result,
        Err(TwitterError::Api {
            status: 403,
            message: "You are not allowed to create a Tweet with duplicate content.".to_string()
        })
    );
}

#[tokio::test]
async fn full_pass_replies_only_to_others() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/999/mentions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "20", "text": "@bedrok thoughts?", "author_id": "200"},
                {"id": "19", "text": "@someone per @bedrok", "author_id": "999"},
                {"id": "18", "text": "@bedrok hello", "author_id": "201"}
            ]
        })))
        .mount(&server)
        .await;

    mount_tweet(
        &server,
        "20",
        json!({"data": {
            "id": "20",
            "text": "@bedrok thoughts?",
            "referenced_tweets": [{"type": "replied_to", "id": "10"}]
        }}),
    )
    .await;
    mount_tweet(
        &server,
        "10",
        json!({"data": {"id": "10", "text": "All politicians lie, so this one is lying"}}),
    )
    .await;
    mount_tweet(
        &server,
        "18",
        json!({"data": {"id": "18", "text": "@bedrok hello"}}),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"id": "50", "text": "🧠 Hasty generalization."}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let twitter = client_for(&server);
    let critic = FixedCritic("Hasty generalization. One liar does not make them all liars.");
    let reports = MentionResponder::new(&twitter, &critic, ResponderSettings::new(BOT_ID))
        .run_once()
        .await
        .unwrap();

    assert_eq!(reports.len(), 3);
    assert_eq!(
        reports[0].outcome,
        MentionOutcome::Replied {
            reply_id: "50".to_string()
        }
    );
    assert_eq!(reports[1].outcome, MentionOutcome::SkippedSelfMention);
    assert_eq!(reports[2].outcome, MentionOutcome::NoParent);

    let requests = server.received_requests().await.unwrap_or_default();
    // Self-mention 19 was never looked up
    assert!(!requests.iter().any(|r| r.url.path() == "/2/tweets/19"));
    let posts: Vec<Value> = requests
        .iter()
        .filter(|r| r.method.as_str() == "POST")
        .filter_map(|r| r.body_json().ok())
        .collect();
    assert_eq!(
        posts,
        vec![json!({
            "text": "🧠 Hasty generalization. One liar does not make them all liars.",
            "reply": {"in_reply_to_tweet_id": "20"}
        })]
    );
}

#[tokio::test]
async fn failed_mentions_fetch_ends_pass() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/999/mentions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "title": "Too Many Requests",
            "detail": "Too Many Requests",
            "type": "about:blank",
            "status": 429
        })))
        .mount(&server)
        .await;

    let twitter = client_for(&server);
    let critic = FixedCritic("unused");
    let result = MentionResponder::new(&twitter, &critic, ResponderSettings::new(BOT_ID))
        .run_once()
        .await;

    assert!(result.unwrap_err().is_rate_limited());
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn body_cut_short_is_transport_error() {
    let base = common::serve_truncated_body().await;

    let result = client_at(&base).get_tweet("20").await;

    assert!(matches!(result, Err(TwitterError::Transport(_))), "got {:?}", result);
}
