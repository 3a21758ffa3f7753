//! Bedrok local test mode
//!
//! Type a post, get the critique the bot would reply with. Only the
//! completion API is called; no X credentials are needed.
//!
//! ## Usage
//!
//!   GROQ_API_KEY="gsk_..." cargo run --bin bedrok-local
//!
//! Enter `q` to quit.

use bedrok::local::run_repl;
use bedrok::{Config, GroqClient};
use std::io;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let groq = match GroqClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if let Err(e) = run_repl(&groq, stdin.lock(), &mut stdout).await {
        eprintln!("Read error: {}", e);
        std::process::exit(1);
    }
}
