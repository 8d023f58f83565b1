//! Knowledge-base documents.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use vrd_core::entities::Document;

use crate::http::{check_response_or, decode};
use crate::{ApiClient, ClientError};

impl ApiClient {
    /// Upload a file from disk as a multipart `file` field.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if the file cannot be read, otherwise any
    /// transport, status, or parse error.
    pub async fn upload_document(&self, path: &Path) -> Result<Document, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
        self.upload_document_bytes(&name, bytes).await
    }

    /// Upload in-memory content under `file_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn upload_document_bytes(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Document, ClientError> {
        tracing::debug!(file_name, size = bytes.len(), "uploading document");
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        let resp = self
            .http
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await?;
        decode(check_response_or(resp, "Upload failed").await?).await
    }

    /// List uploaded documents.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn list_documents(&self) -> Result<Vec<Document>, ClientError> {
        let resp = self.http.get(self.url("/documents")).send().await?;
        decode(check_response_or(resp, "Failed to fetch docs").await?).await
    }
}
