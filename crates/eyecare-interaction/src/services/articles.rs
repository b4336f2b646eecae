use eyecare_core::article::{Article, ArticleCategory, filter_by_category};
use eyecare_core::request::RequestError;

use crate::resource_client::ResourceClient;
use crate::routes::ApiRoutes;

/// Public eye-care articles.
#[derive(Clone)]
pub struct ArticleService {
    client: ResourceClient,
    routes: ApiRoutes,
}

impl ArticleService {
    pub fn new(client: ResourceClient, routes: ApiRoutes) -> Self {
        Self { client, routes }
    }

    pub async fn list(&self) -> Result<Vec<Article>, RequestError> {
        self.client
            .fetch_records(&self.routes.articles(), "articles")
            .await
    }

    /// Articles in `category`; `None` means all of them.
    pub async fn list_in(
        &self,
        category: Option<ArticleCategory>,
    ) -> Result<Vec<Article>, RequestError> {
        let articles = self.list().await?;
        Ok(filter_by_category(&articles, category)
            .into_iter()
            .cloned()
            .collect())
    }
}
