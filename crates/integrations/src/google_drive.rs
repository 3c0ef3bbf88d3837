//! Property imagery from a shared Google Drive folder.
//!
//! Photos are expected to be named after the street address they show. A
//! lookup lists image files in the folder whose name contains the address
//! and returns the most recently modified match.

use async_trait::async_trait;
use codewatch_core::enrichment::{DataSource, ImageLookup, ImageRef};
use codewatch_core::error::EnrichmentError;
use serde::Deserialize;

use crate::http::{parse_response, HttpError};

const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

pub struct GoogleDriveImageLookup {
    client: reqwest::Client,
    api_key: String,
    folder_id: String,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    name: Option<String>,
    thumbnail_link: Option<String>,
    web_content_link: Option<String>,
}

impl GoogleDriveImageLookup {
    pub fn new(client: reqwest::Client, api_key: String, folder_id: String) -> Self {
        Self {
            client,
            api_key,
            folder_id,
        }
    }

    /// Drive search expression for images in the folder named like `address`.
    pub fn search_expression(&self, address: &str) -> String {
        format!(
            "'{}' in parents and mimeType contains 'image/' \
             and name contains '{}' and trashed = false",
            escape(&self.folder_id),
            escape(address)
        )
    }
}

#[async_trait]
impl ImageLookup for GoogleDriveImageLookup {
    fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.folder_id.is_empty()
    }

    /// `query` is `address, city, state`; file names carry only the street
    /// address, so only the part before the first comma is searched.
    async fn find_property_image(&self, query: &str) -> Result<Option<ImageRef>, EnrichmentError> {
        let address = query.split(',').next().unwrap_or(query).trim();
        if address.is_empty() {
            return Ok(None);
        }

        let expression = self.search_expression(address);
        let response = self
            .client
            .get(DRIVE_FILES_URL)
            .query(&[
                ("q", expression.as_str()),
                ("fields", "files(id,name,thumbnailLink,webContentLink)"),
                ("orderBy", "modifiedTime desc"),
                ("pageSize", "1"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(HttpError::from)?;

        let list: FileList = parse_response(response).await?;
        Ok(list.files.into_iter().next().map(into_image_ref))
    }
}

fn into_image_ref(file: DriveFile) -> ImageRef {
    let url = file
        .web_content_link
        .unwrap_or_else(|| format!("https://drive.google.com/uc?export=view&id={}", file.id));
    ImageRef {
        url,
        thumbnail_url: file.thumbnail_link,
        name: file.name,
        source: Some(DataSource::Live),
    }
}

/// Escape a value for a single-quoted Drive query literal.
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
