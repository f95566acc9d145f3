use crate::error::CoreError;
use crate::optimizer::Site;
use crate::provider::StatsProvider;
use crate::provider::types::{
    ApproachRecord, ApproachResponse, OddsResponse, ProjectionRecord, ProjectionsResponse,
    RankedPlayer, RankingsResponse,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

pub const DATAGOLF_BASE_URL: &str = "https://feeds.datagolf.com";

#[derive(Debug, Clone)]
pub struct DataGolfClient {
    client: Client,
    base_url: String,
    api_key: String,
    tour: String,
}

impl DataGolfClient {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DATAGOLF_BASE_URL)
    }

    #[must_use]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            tour: "pga".to_string(),
        }
    }

    #[must_use]
    pub fn tour(mut self, tour: impl Into<String>) -> Self {
        self.tour = tour.into();
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, CoreError> {
        let url = format!("{}/{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("file_format", "json"),
                ("tour", self.tour.as_str()),
            ])
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Network(format!(
                "DataGolf {path} responded with status {status}"
            )));
        }
        tracing::debug!(path, "fetched DataGolf feed");
        Ok(resp.json::<T>().await?)
    }
}

#[async_trait]
impl StatsProvider for DataGolfClient {
    async fn rankings(&self) -> Result<Vec<RankedPlayer>, CoreError> {
        let resp: RankingsResponse = self.get_json("preds/get-dg-rankings", &[]).await?;
        Ok(resp.rankings)
    }

    async fn outright_odds(&self) -> Result<OddsResponse, CoreError> {
        self.get_json(
            "betting-tools/outrights",
            &[("market", "win"), ("odds_format", "american")],
        )
        .await
    }

    async fn approach_stats(&self) -> Result<Vec<ApproachRecord>, CoreError> {
        let resp: ApproachResponse = self.get_json("preds/approach-skill", &[]).await?;
        Ok(resp.data)
    }

    async fn fantasy_projections(&self, site: Site) -> Result<Vec<ProjectionRecord>, CoreError> {
        let resp: ProjectionsResponse = self
            .get_json("preds/fantasy-projection-defaults", &[("site", site.as_str())])
            .await?;
        Ok(resp.projections)
    }
}
