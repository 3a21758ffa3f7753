use std::env;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const TWITTER_BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN";
    pub const TWITTER_API_KEY: &str = "TWITTER_API_KEY";
    pub const TWITTER_API_SECRET: &str = "TWITTER_API_SECRET";
    pub const TWITTER_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
    pub const TWITTER_ACCESS_SECRET: &str = "TWITTER_ACCESS_SECRET";
    pub const BOT_USER_ID: &str = "BOT_USER_ID";
    pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
    // Optional overrides
    pub const GROQ_MODEL: &str = "GROQ_MODEL";
    pub const GROQ_API_URL: &str = "GROQ_API_URL";
    pub const TWITTER_API_BASE: &str = "TWITTER_API_BASE";
}

/// Default values
pub mod defaults {
    pub const GROQ_MODEL: &str = "llama3-8b-8192";
    pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
    pub const TWITTER_API_BASE: &str = "https://api.twitter.com/2";
    /// Mentions requested per pass (the mentions endpoint minimum)
    pub const MAX_MENTIONS: u32 = 5;
    pub const REPLY_PREFIX: &str = "🧠";
}

#[derive(Clone)]
pub struct Config {
    pub twitter_bearer_token: String,
    pub twitter_api_key: String,
    pub twitter_api_secret: String,
    pub twitter_access_token: String,
    pub twitter_access_secret: String,
    pub bot_user_id: String,
    pub groq_api_key: String,
    pub groq_model: String,
    pub groq_api_url: String,
    pub twitter_api_base: String,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Credentials are not validated here: a missing value becomes an empty
    /// string and shows up later as an authentication or lookup failure.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).unwrap_or_default();
        let with_default = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            twitter_bearer_token: required(env_vars::TWITTER_BEARER_TOKEN),
            twitter_api_key: required(env_vars::TWITTER_API_KEY),
            twitter_api_secret: required(env_vars::TWITTER_API_SECRET),
            twitter_access_token: required(env_vars::TWITTER_ACCESS_TOKEN),
            twitter_access_secret: required(env_vars::TWITTER_ACCESS_SECRET),
            bot_user_id: required(env_vars::BOT_USER_ID).trim().to_string(),
            groq_api_key: required(env_vars::GROQ_API_KEY),
            groq_model: with_default(env_vars::GROQ_MODEL, defaults::GROQ_MODEL),
            groq_api_url: with_default(env_vars::GROQ_API_URL, defaults::GROQ_API_URL),
            twitter_api_base: with_default(env_vars::TWITTER_API_BASE, defaults::TWITTER_API_BASE)
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

// Secrets stay out of logs
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn mask(value: &str) -> &'static str {
            if value.is_empty() { "<unset>" } else { "<set>" }
        }
        f.debug_struct("Config")
            .field("twitter_bearer_token", &mask(&self.twitter_bearer_token))
            .field("twitter_api_key", &mask(&self.twitter_api_key))
            .field("twitter_api_secret", &mask(&self.twitter_api_secret))
            .field("twitter_access_token", &mask(&self.twitter_access_token))
            .field("twitter_access_secret", &mask(&self.twitter_access_secret))
            .field("bot_user_id", &self.bot_user_id)
            .field("groq_api_key", &mask(&self.groq_api_key))
            .field("groq_model", &self.groq_model)
            .field("groq_api_url", &self.groq_api_url)
            .field("twitter_api_base", &self.twitter_api_base)
            .finish()
    }
}
