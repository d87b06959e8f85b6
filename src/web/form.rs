//! Board form extraction.
//!
//! The page has two forms posting to the same URL: the compose form
//! (multipart, may carry an image) and the per-post delete form. Both
//! multipart and urlencoded bodies are accepted; the fields present decide
//! which action is taken.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};

use crate::board::{ImageUpload, Submission};

use super::error::PageError;

/// Raw fields of a board form.
#[derive(Debug, Default)]
pub struct BoardForm {
    fields: HashMap<String, String>,
    image: Option<ImageUpload>,
}

/// What a board form asks for.
#[derive(Debug)]
pub enum BoardAction {
    /// Create a post.
    Submit(Submission),
    /// Delete a post. `id` is `None` when `delete_id` isn't a number.
    Delete { id: Option<i64>, password: String },
    /// Neither form's fields were present.
    Unknown,
}

impl BoardForm {
    /// Build a form from already-collected fields.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            image: None,
        }
    }

    /// Read every part of a multipart body.
    ///
    /// An `image` part with no filename or no content is what browsers send
    /// for an empty file input and is treated as absent.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, PageError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();

            if name == "image" {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(str::to_string);
                let content = field.bytes().await?;

                if !file_name.is_empty() && !content.is_empty() {
                    form.image = Some(ImageUpload {
                        file_name,
                        content_type,
                        content: content.to_vec(),
                    });
                }
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Decide which action the fields describe.
    ///
    /// A `body` field means a submission even if delete fields are present.
    pub fn into_action(mut self) -> BoardAction {
        if let Some(body) = self.fields.remove("body") {
            return BoardAction::Submit(Submission {
                body,
                delete_password: self.fields.remove("delete_password").unwrap_or_default(),
                image: self.image,
            });
        }

        match (
            self.fields.remove("delete_id"),
            self.fields.remove("delete_password_check"),
        ) {
            (Some(id), Some(password)) => BoardAction::Delete {
                id: id.trim().parse().ok(),
                password,
            },
            _ => BoardAction::Unknown,
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for BoardForm
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.trim_start().starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| PageError::from_rejection(e.status(), e.body_text()))?;
            Self::from_multipart(multipart).await
        } else {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| PageError::from_rejection(e.status(), e.body_text()))?;
            Ok(Self {
                fields,
                image: None,
            })
        }
    }
}
