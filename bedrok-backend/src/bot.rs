//! One fetch-and-reply pass over the bot's recent mentions.
//!
//! For each mention not written by the bot itself: resolve the post it
//! replies to, ask for a fallacy critique of that post, and reply to the
//! mention with the critique. Failures are isolated per mention; only a
//! failed mentions fetch ends the pass early.

use crate::ai::{CompletionError, CritiqueGenerator};
use crate::config::defaults;
use crate::twitter::{
    Mention, ParentPost, SocialClient, TWITTER_MAX_CHARS, TwitterError, char_weight, weighted_length,
};

#[derive(Debug, Clone)]
pub struct ResponderSettings {
    pub bot_user_id: String,
    pub max_mentions: u32,
    pub reply_prefix: String,
}

impl ResponderSettings {
    pub fn new(bot_user_id: impl Into<String>) -> Self {
        Self {
            bot_user_id: bot_user_id.into(),
            max_mentions: defaults::MAX_MENTIONS,
            reply_prefix: defaults::REPLY_PREFIX.to_string(),
        }
    }
}

/// What happened to a single mention
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MentionOutcome {
    SkippedSelfMention,
    /// No `replied_to` reference, or the parent had no text
    NoParent,
    ParentUnavailable(TwitterError),
    NoCritique(CompletionError),
    Replied { reply_id: String },
    ReplyFailed(TwitterError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionReport {
    pub mention_id: String,
    pub outcome: MentionOutcome,
}

pub struct MentionResponder<'a, S: SocialClient, C: CritiqueGenerator> {
    social: &'a S,
    critic: &'a C,
    settings: ResponderSettings,
}

impl<'a, S: SocialClient, C: CritiqueGenerator> MentionResponder<'a, S, C> {
    pub fn new(social: &'a S, critic: &'a C, settings: ResponderSettings) -> Self {
        Self {
            social,
            critic,
            settings,
        }
    }

    /// Run one pass. `Err` only when the mentions list itself could not be
    /// fetched; the error is logged here so callers may simply return.
    pub async fn run_once(&self) -> Result<Vec<MentionReport>, TwitterError> {
        let mentions = match self
            .social
            .get_mentions(&self.settings.bot_user_id, self.settings.max_mentions)
            .await
        {
            Ok(mentions) => mentions,
            Err(e) => {
                log::error!("Bedrok: Error retrieving mentions: {}", e);
                if e.is_rate_limited() {
                    log::warn!("Bedrok: Rate limited by the mentions endpoint; run again later");
                }
                return Err(e);
            }
        };

        if mentions.is_empty() {
            log::info!("Bedrok: No new mentions.");
            return Ok(Vec::new());
        }

        log::info!("Bedrok: Found {} mention(s)", mentions.len());

        let mut reports = Vec::with_capacity(mentions.len());
        for mention in &mentions {
            let outcome = self.process_mention(mention).await;
            reports.push(MentionReport {
                mention_id: mention.id.clone(),
                outcome,
            });
        }

        Ok(reports)
    }

    async fn process_mention(&self, mention: &Mention) -> MentionOutcome {
        log::info!("Bedrok: Checking mention: {}", mention.id);

        if is_self_mention(mention, &self.settings.bot_user_id) {
            log::info!("Bedrok: Skipping self-mention: {}", mention.id);
            return MentionOutcome::SkippedSelfMention;
        }

        let parent = match resolve_parent(self.social, &mention.id).await {
            Ok(Some(parent)) => parent,
            Ok(None) => {
                log::info!("Bedrok: No parent tweet found for {}.", mention.id);
                return MentionOutcome::NoParent;
            }
            Err(e) => {
                log::error!("Bedrok: Error retrieving parent tweet of {}: {}", mention.id, e);
                return MentionOutcome::ParentUnavailable(e);
            }
        };

        log::debug!("Bedrok: Parent of {} is {}", mention.id, parent.id);

        let critique = match self.critic.critique(&parent.text).await {
            Ok(critique) => critique,
            Err(e) => {
                log::warn!("Bedrok: No critique generated for {}: {}", mention.id, e);
                return MentionOutcome::NoCritique(e);
            }
        };

        let reply = format_reply(&self.settings.reply_prefix, &critique);
        match self.social.create_reply(&reply, &mention.id).await {
            Ok(reply_id) => {
                log::info!("Bedrok: Replied to tweet {} (reply {})", mention.id, reply_id);
                MentionOutcome::Replied { reply_id }
            }
            Err(e) => {
                log::error!("Bedrok: Error replying to tweet {}: {}", mention.id, e);
                MentionOutcome::ReplyFailed(e)
            }
        }
    }
}

pub fn is_self_mention(mention: &Mention, bot_user_id: &str) -> bool {
    !bot_user_id.is_empty() && mention.author_id.trim() == bot_user_id
}

/// Follow the mention's first `replied_to` reference. `Ok(None)` when there
/// is no such reference or the parent has no text.
pub async fn resolve_parent<S: SocialClient + ?Sized>(
    social: &S,
    mention_id: &str,
) -> Result<Option<ParentPost>, TwitterError> {
    let mention = social.get_tweet(mention_id).await?;

    let Some(parent_id) = mention.replied_to_id() else {
        return Ok(None);
    };

    let parent = social.get_tweet(parent_id).await?;
    if parent.text.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(ParentPost {
        id: parent.id,
        text: parent.text,
    }))
}

/// Prefix the critique and keep the whole post within the platform's
/// weighted length limit.
pub fn format_reply(prefix: &str, critique: &str) -> String {
    let text = if prefix.is_empty() {
        critique.to_string()
    } else {
        format!("{} {}", prefix, critique)
    };
    truncate_for_twitter(&text, TWITTER_MAX_CHARS)
}

const ELLIPSIS: char = '…';

fn truncate_for_twitter(text: &str, max_weight: usize) -> String {
    if weighted_length(text) <= max_weight {
        return text.to_string();
    }

    let budget = max_weight.saturating_sub(char_weight(ELLIPSIS));
    let mut used = 0;
    let mut kept = String::new();
    for c in text.chars() {
        used += char_weight(c);
        if used > budget {
            break;
        }
        kept.push(c);
    }

    let mut truncated = kept.trim_end().to_string();
    truncated.push(ELLIPSIS);
    truncated
}
