//! HTTP Repository
//!
//! `reqwest`-backed implementation of the repository traits against the
//! LifeFlow REST API.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::{CardList, DomainError, DomainResult, LifeEntry, TaskCard};

use super::config::ApiConfig;
use super::traits::{ListRepository, TaskRepository, TimelineRepository};
use super::types::{
    CheckinRequest, EntryCreate, EntryUpdate, ListCreate, ListUpdate, ReorderRequest, TaskCreate,
    TaskUpdate, TimelinePage,
};

/// Remote persistence over HTTP
pub struct HttpRepository {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRepository {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success status to the domain error taxonomy.
    async fn check(response: reqwest::Response) -> DomainResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response.text().await.unwrap_or_default();
        log::debug!("remote rejected request: {} {}", status, detail);
        Err(match status {
            StatusCode::NOT_FOUND => DomainError::NotFound(detail),
            s if s.is_client_error() => DomainError::InvalidInput(detail),
            s => DomainError::Persistence(format!("{}: {}", s, detail)),
        })
    }
}

/// Transport-level failures are persistence errors.
fn transport(e: reqwest::Error) -> DomainError {
    DomainError::Persistence(e.to_string())
}

#[async_trait]
impl TaskRepository for HttpRepository {
    async fn list(
        &self,
        list_id: Option<&str>,
        include_deleted: bool,
    ) -> DomainResult<Vec<TaskCard>> {
        let mut request = self.client.get(self.url("/tasks"));
        if let Some(list_id) = list_id {
            request = request.query(&[("list_id", list_id)]);
        }
        if include_deleted {
            request = request.query(&[("include_deleted", "true")]);
        }
        let response = Self::check(request.send().await.map_err(transport)?).await?;
        response.json().await.map_err(transport)
    }

    async fn create(&self, req: &TaskCreate) -> DomainResult<TaskCard> {
        let response = self
            .client
            .post(self.url("/tasks"))
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?.json().await.map_err(transport)
    }

    async fn update(&self, id: &str, req: &TaskUpdate) -> DomainResult<TaskCard> {
        let response = self
            .client
            .put(self.url(&format!("/tasks/{}", id)))
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?.json().await.map_err(transport)
    }

    async fn delete(&self, id: &str, hard: bool) -> DomainResult<()> {
        let mut request = self.client.delete(self.url(&format!("/tasks/{}", id)));
        if hard {
            request = request.query(&[("hard_delete", "true")]);
        }
        Self::check(request.send().await.map_err(transport)?).await?;
        Ok(())
    }

    async fn checkin(&self, id: &str, req: &CheckinRequest) -> DomainResult<TaskCard> {
        let response = self
            .client
            .post(self.url(&format!("/tasks/{}/checkin", id)))
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?.json().await.map_err(transport)
    }

    async fn reorder(&self, req: &ReorderRequest) -> DomainResult<()> {
        let response = self
            .client
            .post(self.url("/tasks/reorder"))
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ListRepository for HttpRepository {
    async fn list(&self) -> DomainResult<Vec<CardList>> {
        let response = self
            .client
            .get(self.url("/lists"))
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?.json().await.map_err(transport)
    }

    async fn create(&self, req: &ListCreate) -> DomainResult<CardList> {
        let response = self
            .client
            .post(self.url("/lists"))
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?.json().await.map_err(transport)
    }

    async fn update(&self, id: &str, req: &ListUpdate) -> DomainResult<CardList> {
        let response = self
            .client
            .put(self.url(&format!("/lists/{}", id)))
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?.json().await.map_err(transport)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/lists/{}", id)))
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl TimelineRepository for HttpRepository {
    async fn fetch_page(
        &self,
        cursor: Option<&str>,
        page_size: usize,
    ) -> DomainResult<TimelinePage> {
        let mut request = self
            .client
            .get(self.url("/life-entries"))
            .query(&[("page_size", page_size.to_string())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }
        let response = Self::check(request.send().await.map_err(transport)?).await?;
        response.json().await.map_err(transport)
    }

    async fn create(&self, req: &EntryCreate) -> DomainResult<LifeEntry> {
        let response = self
            .client
            .post(self.url("/life-entries"))
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?.json().await.map_err(transport)
    }

    async fn update(&self, id: &str, req: &EntryUpdate) -> DomainResult<LifeEntry> {
        let response = self
            .client
            .put(self.url(&format!("/life-entries/{}", id)))
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?.json().await.map_err(transport)
    }

    async fn delete(&self, id: &str, hard: bool) -> DomainResult<()> {
        let mut request = self
            .client
            .delete(self.url(&format!("/life-entries/{}", id)));
        if hard {
            request = request.query(&[("hard_delete", "true")]);
        }
        Self::check(request.send().await.map_err(transport)?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let repo = HttpRepository::new(&ApiConfig {
            base_url: "http://example.test/api/".to_string(),
            ..Default::default()
        });
        assert_eq!(repo.url("/tasks"), "http://example.test/api/tasks");
    }
}
