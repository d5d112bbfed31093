use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes HTTP requests for [`super::fetch_bytes`]. Implemented by
/// [`super::BasicClient`]; tests substitute their own.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
