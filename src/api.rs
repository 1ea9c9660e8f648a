use crate::card::Card;
use crate::config::Settings;
use crate::error::{Result, SwuError};
use reqwest::{Client, StatusCode};
use tracing::debug;

pub struct SwuClient {
    client: Client,
    base_url: String,
}

impl SwuClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()?;
        Ok(SwuClient {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn card_url(&self, set_code: &str, card_number: u32) -> String {
        format!(
            "{}/{}/{}?format=json",
            self.base_url,
            set_code.to_lowercase(),
            card_number
        )
    }

    pub async fn fetch_card(&self, set_code: &str, card_number: u32) -> Result<Card> {
        let url = self.card_url(set_code, card_number);
        debug!(%url, "fetching card");

        let response = self.client.get(&url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(SwuError::Status {
                set: set_code.to_string(),
                number: card_number,
                status: response.status().as_u16(),
            });
        }
        let body = response.text().await?;
        let card: Card = serde_json::from_str(&body)?;
        Ok(card)
    }

    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        debug!(%url, "fetching page");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
