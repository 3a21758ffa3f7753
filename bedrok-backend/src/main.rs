//! Bedrok: one fetch-and-reply pass over recent mentions, then exit.
//!
//! ## Usage
//!
//!   cargo run --bin bedrok
//!
//! Scheduling (cron, systemd timer) is left to the caller. Configuration is
//! read from the environment or a `.env` file; see `config::env_vars`.

use bedrok::bot::{MentionResponder, ResponderSettings};
use bedrok::{Config, GroqClient, TwitterClient};
use dotenv::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    log::debug!("Bedrok: {:?}", config);

    let twitter = TwitterClient::from_config(&config);
    let groq = match GroqClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Bedrok: Failed to create completion client: {}", e);
            return;
        }
    };

    log::info!(
        "Bedrok: Starting pass for user_id={} (model={})",
        config.bot_user_id,
        groq.model()
    );

    let responder = MentionResponder::new(
        &twitter,
        &groq,
        ResponderSettings::new(config.bot_user_id.clone()),
    );

    // A failed mentions fetch is already logged by the responder
    if let Ok(reports) = responder.run_once().await {
        let replied = reports
            .iter()
            .filter(|r| matches!(r.outcome, bedrok::MentionOutcome::Replied { .. }))
            .count();
        log::info!(
            "Bedrok: Pass complete, {} mention(s) checked, {} replied",
            reports.len(),
            replied
        );
    }
}
