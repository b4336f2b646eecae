use eyecare_core::WorkflowError;
use eyecare_core::request::{HttpMethod, RequestError};
use eyecare_core::scan::{ScanRecord, ScanReview, ScanReviewDraft};
use std::path::Path;

use crate::error::ServiceError;
use crate::resource_client::ResourceClient;
use crate::routes::ApiRoutes;
use crate::transport::FilePart;

const UPLOAD_FIELD: &str = "image";

/// Eye scans: history, upload and specialist review.
#[derive(Clone)]
pub struct ScanService {
    client: ResourceClient,
    routes: ApiRoutes,
    media_base_url: String,
}

impl ScanService {
    pub fn new(client: ResourceClient, routes: ApiRoutes, media_base_url: impl Into<String>) -> Self {
        Self {
            client,
            routes,
            media_base_url: media_base_url.into(),
        }
    }

    /// The signed-in user's scans (all scans for specialists).
    pub async fn list(&self) -> Result<Vec<ScanRecord>, RequestError> {
        self.client.fetch_records(&self.routes.scans(), "scans").await
    }

    pub async fn get(&self, id: u64) -> Result<ScanRecord, RequestError> {
        self.client
            .fetch_record(&self.routes.scan(id), HttpMethod::Get, None)
            .await
    }

    /// Uploads an image; the response is the classified scan.
    pub async fn upload(&self, path: &Path) -> Result<ScanRecord, ServiceError> {
        if !self.client.capabilities().can_upload_scans {
            return Err(WorkflowError::not_permitted("Only patients can upload scans.").into());
        }

        let file = FilePart::from_path(UPLOAD_FIELD, path)
            .await
            .map_err(|e| ServiceError::File {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        tracing::info!(file = %file.file_name, bytes = file.bytes.len(), "Uploading scan");

        let endpoint = self.routes.scans();
        let body = self.client.upload(&endpoint, file).await?;
        Ok(crate::resource_client::decode(body, &endpoint.path)?)
    }

    /// Submits a specialist review for `scan`.
    ///
    /// The draft is checked locally first; on any local failure nothing is sent.
    pub async fn submit_review(
        &self,
        scan: &ScanRecord,
        draft: &ScanReviewDraft,
    ) -> Result<ScanReview, ServiceError> {
        draft.validate_for(scan, &self.client.capabilities())?;

        let payload = serde_json::to_value(draft.to_payload())
            .map_err(|e| RequestError::malformed(e.to_string()))?;
        let review: ScanReview = self
            .client
            .fetch_record(&self.routes.scan_review(scan.id), HttpMethod::Post, Some(payload))
            .await?;
        tracing::info!(scan_id = scan.id, "Scan review submitted");
        Ok(review)
    }

    pub fn image_url(&self, scan: &ScanRecord) -> Option<String> {
        scan.image_url(&self.media_base_url)
    }
}
