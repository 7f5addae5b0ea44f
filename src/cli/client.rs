//! HTTP client for the Launchpad REST API.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::models::{activity, database as managed_database, domain, project, system_metric};
use crate::schemas::{
    CreateActivityRequest, CreateDatabaseRequest, CreateDomainRequest, CreateProjectRequest,
    CreateSystemMetricRequest, UpdateDomainRequest, UpdateProjectRequest,
};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map non-2xx responses to `ClientError::Api`, using the server's
    /// `{"message"}` body when there is one
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or_else(|_| {
                if text.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                } else {
                    text
                }
            });

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = Self::check(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.fetch(self.request(Method::GET, path)).await
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.fetch(self.request(method, path).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn health(&self) -> Result<Health, ClientError> {
        self.get("/api/health").await
    }

    // Projects

    pub async fn list_projects(&self) -> Result<Vec<project::Model>, ClientError> {
        self.get("/api/projects").await
    }

    pub async fn get_project(&self, id: i64) -> Result<project::Model, ClientError> {
        self.get(&format!("/api/projects/{}", id)).await
    }

    pub async fn create_project(
        &self,
        req: &CreateProjectRequest,
    ) -> Result<project::Model, ClientError> {
        self.send(Method::POST, "/api/projects", req).await
    }

    pub async fn update_project(
        &self,
        id: i64,
        req: &UpdateProjectRequest,
    ) -> Result<project::Model, ClientError> {
        self.send(Method::PATCH, &format!("/api/projects/{}", id), req)
            .await
    }

    pub async fn delete_project(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/api/projects/{}", id)).await
    }

    pub async fn project_activities(
        &self,
        id: i64,
        limit: Option<u64>,
    ) -> Result<Vec<activity::Model>, ClientError> {
        let mut builder = self.request(Method::GET, &format!("/api/projects/{}/activities", id));
        if let Some(limit) = limit {
            builder = builder.query(&[("limit", limit)]);
        }
        self.fetch(builder).await
    }

    // Domains

    pub async fn list_domains(&self) -> Result<Vec<domain::Model>, ClientError> {
        self.get("/api/domains").await
    }

    pub async fn create_domain(
        &self,
        req: &CreateDomainRequest,
    ) -> Result<domain::Model, ClientError> {
        self.send(Method::POST, "/api/domains", req).await
    }

    pub async fn update_domain(
        &self,
        id: i64,
        req: &UpdateDomainRequest,
    ) -> Result<domain::Model, ClientError> {
        self.send(Method::PATCH, &format!("/api/domains/{}", id), req)
            .await
    }

    pub async fn delete_domain(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/api/domains/{}", id)).await
    }

    // Databases

    pub async fn list_databases(&self) -> Result<Vec<managed_database::Model>, ClientError> {
        self.get("/api/databases").await
    }

    pub async fn create_database(
        &self,
        req: &CreateDatabaseRequest,
    ) -> Result<managed_database::Model, ClientError> {
        self.send(Method::POST, "/api/databases", req).await
    }

    pub async fn delete_database(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/api/databases/{}", id)).await
    }

    // Activities

    pub async fn list_activities(
        &self,
        limit: Option<u64>,
    ) -> Result<Vec<activity::Model>, ClientError> {
        let mut builder = self.request(Method::GET, "/api/activities");
        if let Some(limit) = limit {
            builder = builder.query(&[("limit", limit)]);
        }
        self.fetch(builder).await
    }

    pub async fn create_activity(
        &self,
        req: &CreateActivityRequest,
    ) -> Result<activity::Model, ClientError> {
        self.send(Method::POST, "/api/activities", req).await
    }

    // System metrics

    pub async fn latest_metric(&self) -> Result<system_metric::Model, ClientError> {
        self.get("/api/system-metrics").await
    }

    pub async fn record_metric(
        &self,
        req: &CreateSystemMetricRequest,
    ) -> Result<system_metric::Model, ClientError> {
        self.send(Method::POST, "/api/system-metrics", req).await
    }
}
