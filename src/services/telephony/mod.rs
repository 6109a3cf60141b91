pub mod twilio;

use async_trait::async_trait;

#[async_trait]
pub trait CallProvider: Send + Sync {
    /// Ring `to`. The vendor fetches call instructions from `callback_url`
    /// once the phone is answered. Returns the vendor's call id.
    async fn place_call(&self, to: &str, callback_url: &str) -> anyhow::Result<String>;
}
