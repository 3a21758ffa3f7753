//! Process-wide HTTP client shared by the X API and completion clients.

use once_cell::sync::Lazy;
use reqwest::Client;

static SHARED_CLIENT: Lazy<Client> = Lazy::new(Client::new);

/// Shared `reqwest::Client` (connection pool is reused across calls).
pub fn shared_client() -> &'static Client {
    &SHARED_CLIENT
}
