//! REST client for the remote row store.
//!
//! Speaks the PostgREST conventions: `GET /rest/v1/<table>` with `eq.`
//! filters, `POST` with `Prefer: return=representation` so inserts come
//! back with their server-assigned id, `DELETE` with an id filter. The
//! anonymous API key rides along as both the `apikey` header and a bearer
//! token. All queries are scoped to the owning user.

use gated_core::EntityId;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::rows::{
    GarmentRow, NewGarmentRow, NewOrderRow, NewReleaseRow, OrderRow, ReleaseRow,
};
use super::{StoreError, WardrobeStore};
use crate::config::StoreConfig;

const GARMENTS_TABLE: &str = "wardrobe_items";
const ORDERS_TABLE: &str = "orders";
const RELEASES_TABLE: &str = "drops";

/// Client for the remote row store, scoped to one owner.
#[derive(Clone)]
pub struct StoreClient {
    client: reqwest::Client,
    base_url: String,
    owner: Uuid,
}

impl StoreClient {
    /// Create a client from the store configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StoreConfig, owner: Uuid) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();

        let key = config.api_key.expose_secret();
        let apikey = HeaderValue::from_str(key).map_err(|_| StoreError::Api {
            status: 0,
            message: "API key is not a valid header value".to_owned(),
        })?;
        headers.insert("apikey", apikey);

        let bearer = format!("Bearer {key}");
        let auth = HeaderValue::from_str(&bearer).map_err(|_| StoreError::Api {
            status: 0,
            message: "API key is not a valid header value".to_owned(),
        })?;
        headers.insert("Authorization", auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            owner,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    /// Fetch all rows of `table` belonging to the owner.
    async fn list_rows<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, StoreError> {
        let response = self
            .client
            .get(self.table_url(table))
            .query(&[
                ("select", "*".to_owned()),
                ("owner_id", format!("eq.{}", self.owner)),
            ])
            .send()
            .await?;

        let body = read_success_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Insert one row and return the server's representation of it.
    async fn insert_row<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        row: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;

        let body = read_success_body(response).await?;
        // Representation comes back as a one-element array.
        let mut rows: Vec<T> = serde_json::from_str(&body)?;
        match rows.pop() {
            Some(row) => Ok(row),
            None => Err(StoreError::MissingRow),
        }
    }

    /// Delete the row with the given id. Deleting an absent id succeeds.
    async fn delete_row(&self, table: &str, id: &EntityId) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.table_url(table))
            .query(&[
                ("id", format!("eq.{id}")),
                ("owner_id", format!("eq.{}", self.owner)),
            ])
            .send()
            .await?;

        read_success_body(response).await?;
        Ok(())
    }
}

/// Check the status and pull the body text for parsing or diagnostics.
async fn read_success_body(response: reqwest::Response) -> Result<String, StoreError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::warn!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "store returned non-success status"
        );
        return Err(StoreError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(body)
}

impl WardrobeStore for StoreClient {
    async fn list_garments(&self) -> Result<Vec<GarmentRow>, StoreError> {
        self.list_rows(GARMENTS_TABLE).await
    }

    async fn insert_garment(&self, row: NewGarmentRow) -> Result<GarmentRow, StoreError> {
        self.insert_row(GARMENTS_TABLE, &row).await
    }

    async fn delete_garment(&self, id: &EntityId) -> Result<(), StoreError> {
        self.delete_row(GARMENTS_TABLE, id).await
    }

    async fn list_orders(&self) -> Result<Vec<OrderRow>, StoreError> {
        self.list_rows(ORDERS_TABLE).await
    }

    async fn insert_order(&self, row: NewOrderRow) -> Result<OrderRow, StoreError> {
        self.insert_row(ORDERS_TABLE, &row).await
    }

    async fn delete_order(&self, id: &EntityId) -> Result<(), StoreError> {
        self.delete_row(ORDERS_TABLE, id).await
    }

    async fn list_releases(&self) -> Result<Vec<ReleaseRow>, StoreError> {
        self.list_rows(RELEASES_TABLE).await
    }

    async fn insert_release(&self, row: NewReleaseRow) -> Result<ReleaseRow, StoreError> {
        self.insert_row(RELEASES_TABLE, &row).await
    }

    async fn delete_release(&self, id: &EntityId) -> Result<(), StoreError> {
        self.delete_row(RELEASES_TABLE, id).await
    }
}
