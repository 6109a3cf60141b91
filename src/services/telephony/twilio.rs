use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use super::CallProvider;

pub struct TwilioCallProvider {
    account_sid: String,
    auth_token: String,
    from_number: String,
    client: reqwest::Client,
}

impl TwilioCallProvider {
    pub fn new(account_sid: String, auth_token: String, from_number: String) -> Self {
        Self {
            account_sid,
            auth_token,
            from_number,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct CallResource {
    sid: String,
}

#[async_trait]
impl CallProvider for TwilioCallProvider {
    async fn place_call(&self, to: &str, callback_url: &str) -> anyhow::Result<String> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Calls.json",
            self.account_sid
        );

        let resp = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", self.from_number.as_str()), ("Url", callback_url)])
            .send()
            .await
            .context("failed to reach Twilio Calls API")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Twilio API error ({status}): {body}");
        }

        let call: CallResource = resp
            .json()
            .await
            .context("failed to parse Twilio call response")?;

        Ok(call.sid)
    }
}
