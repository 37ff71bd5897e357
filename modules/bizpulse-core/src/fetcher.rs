//! Record fetcher: one bounded query against the license registry.

use bizpulse_common::{BusinessRecord, Config, RawBusinessRecord};
use socrata_client::{query, SocrataClient, SoqlQuery, SortOrder};

use crate::error::FetchError;

const ZIP_FIELD: &str = "zip_code";
const LOCATION_FIELD: &str = "location";
const START_DATE_FIELD: &str = "location_start_date";

/// Build the registry query: zip prefix allow-list (OR) AND a non-null
/// location, newest license start first, truncated at `limit`.
pub fn business_query(zip_codes: &[String], limit: u32) -> SoqlQuery {
    let zip_clause = query::any_of(zip_codes.iter().map(|z| query::starts_with(ZIP_FIELD, z)));
    SoqlQuery::new()
        .where_clause(zip_clause)
        .where_clause(query::is_not_null(LOCATION_FIELD))
        .limit(limit)
        .order_by(START_DATE_FIELD, SortOrder::Desc)
}

pub struct RecordFetcher {
    client: SocrataClient,
    zip_codes: Vec<String>,
}

impl RecordFetcher {
    pub fn new(client: SocrataClient, zip_codes: Vec<String>) -> Self {
        Self { client, zip_codes }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = SocrataClient::new(&config.dataset_url)
            .with_app_token(config.socrata_app_token.clone());
        Self::new(client, config.zip_codes.clone())
    }

    /// Fetch at most `limit` records. Idempotent; safe to retry.
    pub async fn fetch(&self, limit: u32) -> Result<Vec<BusinessRecord>, FetchError> {
        tracing::info!(zip_codes = ?self.zip_codes, limit, "Fetching business records");

        let q = business_query(&self.zip_codes, limit);
        let rows: Vec<RawBusinessRecord> = self.client.query(&q).await.map_err(|e| {
            let err = FetchError::from(e);
            tracing::error!(error = %err, "Failed to fetch business records");
            err
        })?;

        let records: Vec<BusinessRecord> = rows.into_iter().map(BusinessRecord::from).collect();

        let unplaceable = records.iter().filter(|r| r.coordinates().is_none()).count();
        let keyless = records.iter().filter(|r| r.location_account.is_empty()).count();
        if keyless > 0 {
            tracing::warn!(keyless, "Records without location_account");
        }
        tracing::info!(
            count = records.len(),
            unplaceable,
            "Fetched business records"
        );

        Ok(records)
    }
}
