use async_trait::async_trait;
use pricescout_core::{OfferProvider, ProviderError, RawOffer, Region};

use crate::client::SerpApiClient;

#[async_trait]
impl OfferProvider for SerpApiClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_configured(&self) -> bool {
        self.has_api_key()
    }

    async fn fetch(&self, query_text: &str, region: Region) -> Result<Vec<RawOffer>, ProviderError> {
        let offers = self.search(query_text, region).await?;
        tracing::debug!(
            provider = %self.name,
            engine = %self.engine,
            region = %region,
            offers = offers.len(),
            "SerpApi query returned"
        );
        Ok(offers)
    }
}
