//! Form-encoded request bodies
//!
//! Accepts both `multipart/form-data` and `application/x-www-form-urlencoded`
//! so HTML forms and file-carrying clients hit the same handlers.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use bytes::Bytes;
use std::collections::HashMap;

use crate::error::{Error, Result};

/// A file part from a multipart body
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Text fields plus file parts grouped by field name
#[derive(Debug, Default)]
pub struct FormInput {
    fields: HashMap<String, String>,
    files: HashMap<String, Vec<UploadedFile>>,
}

impl FormInput {
    /// A required text field
    pub fn required(&self, name: &str) -> Result<String> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| Error::BadRequest(format!("Missing form field '{}'", name)))
    }

    /// An optional text field; empty values count as absent
    pub fn optional(&self, name: &str) -> Option<String> {
        self.fields.get(name).filter(|v| !v.is_empty()).cloned()
    }

    /// The first file sent under `name`
    pub fn file(&self, name: &str) -> Result<&UploadedFile> {
        self.files
            .get(name)
            .and_then(|files| files.first())
            .ok_or_else(|| Error::BadRequest(format!("Missing file field '{}'", name)))
    }

    /// Every file sent under `name` that carries a file name
    pub fn named_files(&self, name: &str) -> Vec<&UploadedFile> {
        self.files
            .get(name)
            .map(|files| {
                files
                    .iter()
                    .filter(|f| f.file_name.as_deref().is_some_and(|n| !n.is_empty()))
                    .collect()
            })
            .unwrap_or_default()
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut input = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();

            if field.file_name().is_some() {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                input.files.entry(name).or_default().push(UploadedFile {
                    file_name,
                    content_type,
                    data,
                });
            } else {
                let value = field.text().await?;
                input.fields.insert(name, value);
            }
        }

        Ok(input)
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormInput
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| Error::BadRequest(e.body_text()))?;
            Self::from_multipart(multipart).await
        } else {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| Error::BadRequest(e.body_text()))?;
            Ok(Self {
                fields,
                files: HashMap::new(),
            })
        }
    }
}
