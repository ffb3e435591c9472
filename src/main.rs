//! Intercom Router Entry Point
//!
//! Loads configuration and the number registry, then serves the telephony
//! webhooks, admin pages and API.

use intercom_router::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run().await
}
