//! Dataset service

use url::form_urlencoded::byte_serialize;

use crate::api::{PageParams, PaginatedResponse, RequestClient};
use crate::error::Result;
use crate::models::Dataset;

/// Collection path for datasets.
pub const DATASETS_PATH: &str = "/api/dataset/";

/// Paginated listing path for datasets.
pub const DATASETS_PAGE_PATH: &str = "/api/dataset/page";

/// Typed façade for the dataset endpoints.
#[derive(Debug, Clone)]
pub struct DatasetService {
    client: RequestClient,
}

impl DatasetService {
    /// Create a service on top of `client`
    pub fn new(client: RequestClient) -> Self {
        Self { client }
    }

    /// `GET /api/dataset/`: every dataset, in server order
    ///
    /// An empty collection is an empty `Vec`, not an error.
    pub async fn get_datasets(&self) -> Result<Vec<Dataset>> {
        self.client.get(DATASETS_PATH).await
    }

    /// `GET /api/dataset/{id}`: a single dataset
    ///
    /// `id` is percent-encoded as one path segment.
    pub async fn get_dataset(&self, id: &str) -> Result<Dataset> {
        self.client.get(&dataset_path(id)).await
    }

    /// `GET /api/dataset/page`: one page of datasets
    pub async fn get_datasets_page(&self, params: &PageParams) -> Result<PaginatedResponse<Dataset>> {
        self.client
            .get_with_query(DATASETS_PAGE_PATH, &params.to_query())
            .await
    }
}

fn dataset_path(id: &str) -> String {
    let encoded: String = byte_serialize(id.as_bytes())
        .collect::<String>()
        // form encoding turns spaces into '+', which is literal in a path
        .replace('+', "%20");
    format!("{}{}", DATASETS_PATH, encoded)
}
