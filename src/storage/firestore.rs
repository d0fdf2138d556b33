//! Firestore REST document store.
//!
//! Talks to `{host}/v1/projects/{project}/databases/(default)/documents`:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | create (server-assigned name) | `POST {base}/{collection}` |
//! | create-or-replace | `PATCH {base}/{collection}/{id}` |
//! | get | `GET {base}/{collection}/{id}` |
//! | list | `GET {base}/{collection}?pageSize=N&pageToken=T` |
//! | delete | `DELETE {base}/{collection}/{id}` |
//!
//! A 404 on get, list or delete means absence and is not an error.

use crate::config::{FirestoreConfig, HttpConfig, build_http_client};
use crate::models::Collection;
use crate::storage::document::{Document, Fields};
use crate::storage::traits::{DocumentStore, validate_document_id};
use crate::{Error, Result};
use reqwest::StatusCode;
use reqwest::blocking::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};

/// Documents requested per list page.
pub const DEFAULT_PAGE_SIZE: u32 = 300;

/// Request body for writes.
#[derive(Debug, Serialize)]
struct WriteBody<'a> {
    fields: &'a Fields,
}

/// One page of a list response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPage {
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Blocking Firestore REST client.
pub struct FirestoreClient {
    /// Documents root URL.
    base_url: String,
    /// Page size for list requests.
    page_size: u32,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl FirestoreClient {
    /// Creates a client for the configured project.
    #[must_use]
    pub fn new(config: &FirestoreConfig) -> Self {
        Self {
            base_url: config.documents_url(),
            page_size: DEFAULT_PAGE_SIZE,
            client: build_http_client(HttpConfig::default()),
        }
    }

    /// Sets HTTP client timeouts.
    #[must_use]
    pub fn with_http_config(mut self, config: HttpConfig) -> Self {
        self.client = build_http_client(config);
        self
    }

    /// Sets the list page size (at least 1).
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Returns the documents root URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, collection: Collection) -> String {
        format!("{}/{}", self.base_url, collection.as_str())
    }

    fn document_url(&self, collection: Collection, id: &str) -> String {
        format!("{}/{}/{id}", self.base_url, collection.as_str())
    }

    /// Sends a request, mapping transport failures to `NetworkFailure`.
    fn send(operation: &str, request: RequestBuilder) -> Result<Response> {
        request.send().map_err(|e| {
            let error_kind = if e.is_timeout() {
                "timeout"
            } else if e.is_connect() {
                "connect"
            } else if e.is_request() {
                "request"
            } else {
                "unknown"
            };
            tracing::error!(
                backend = "firestore",
                operation = operation,
                error = %e,
                error_kind = error_kind,
                is_timeout = e.is_timeout(),
                is_connect = e.is_connect(),
                "Document store request failed"
            );
            Error::NetworkFailure {
                operation: operation.to_string(),
                status: None,
                cause: format!("{error_kind} error: {e}"),
            }
        })
    }

    /// Converts a non-2xx response into `NetworkFailure`.
    fn status_error(operation: &str, response: Response) -> Error {
        let status = response.status();
        let body = response.text().unwrap_or_default();
        tracing::error!(
            backend = "firestore",
            operation = operation,
            status = %status,
            body = %body,
            "Document store returned error status"
        );
        Error::NetworkFailure {
            operation: operation.to_string(),
            status: Some(status.as_u16()),
            cause: format!("Firebase error: {}", status.as_u16()),
        }
    }

    fn parse<T: serde::de::DeserializeOwned>(operation: &str, response: Response) -> Result<T> {
        response.json().map_err(|e| {
            tracing::error!(
                backend = "firestore",
                operation = operation,
                error = %e,
                "Failed to parse document store response"
            );
            Error::OperationFailed {
                operation: operation.to_string(),
                cause: e.to_string(),
            }
        })
    }

    fn list_page(&self, collection: Collection, page_token: Option<&str>) -> Result<ListPage> {
        let mut request = self
            .client
            .get(self.collection_url(collection))
            .query(&[("pageSize", self.page_size.to_string())]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = Self::send("list_documents", request)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(ListPage::default());
        }
        if !response.status().is_success() {
            return Err(Self::status_error("list_documents", response));
        }
        Self::parse("list_documents", response)
    }
}

impl DocumentStore for FirestoreClient {
    fn name(&self) -> &'static str {
        "firestore"
    }

    fn create_document(&self, collection: Collection, fields: &Fields) -> Result<String> {
        let request = self
            .client
            .post(self.collection_url(collection))
            .json(&WriteBody { fields });

        let response = Self::send("create_document", request)?;
        if !response.status().is_success() {
            return Err(Self::status_error("create_document", response));
        }

        let document: Document = Self::parse("create_document", response)?;
        document.name.ok_or_else(|| Error::OperationFailed {
            operation: "create_document".to_string(),
            cause: "response has no document name".to_string(),
        })
    }

    fn put_document(&self, collection: Collection, id: &str, fields: &Fields) -> Result<()> {
        validate_document_id(id)?;
        let request = self
            .client
            .patch(self.document_url(collection, id))
            .json(&WriteBody { fields });

        let response = Self::send("put_document", request)?;
        if !response.status().is_success() {
            return Err(Self::status_error("put_document", response));
        }
        Ok(())
    }

    fn get_document(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        validate_document_id(id)?;
        let request = self.client.get(self.document_url(collection, id));

        let response = Self::send("get_document", request)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::status_error("get_document", response));
        }
        Self::parse("get_document", response).map(Some)
    }

    fn list_documents(&self, collection: Collection) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.list_page(collection, page_token.as_deref())?;
            documents.extend(page.documents);
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(
            collection = %collection,
            count = documents.len(),
            "Listed documents"
        );
        Ok(documents)
    }

    fn delete_document(&self, collection: Collection, id: &str) -> Result<bool> {
        validate_document_id(id)?;
        let request = self.client.delete(self.document_url(collection, id));

        let response = Self::send("delete_document", request)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(Self::status_error("delete_document", response));
        }
        Ok(true)
    }
}
