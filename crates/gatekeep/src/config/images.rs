use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::{Error, Result};

/// Profile image hosting service
#[derive(Serialize, Deserialize, Clone)]
pub enum ImageHost {
    /// Don't accept profile images
    Disabled,
    /// Upload images to an HTTP image host
    Http { endpoint: String, key: String },
    /// Pretend to upload, handing back a synthetic URL
    Dummy,
}

impl Default for ImageHost {
    fn default() -> ImageHost {
        ImageHost::Disabled
    }
}

impl ImageHost {
    /// Upload raw image bytes, returning the hosted URL
    pub async fn upload(&self, data: &[u8]) -> Result<Option<String>> {
        match self {
            ImageHost::Disabled => Ok(None),
            ImageHost::Dummy => Ok(Some(format!("https://images.invalid/{}", nanoid!(10)))),
            ImageHost::Http { endpoint, key } => {
                let mut map = HashMap::new();
                map.insert("key", key.clone());
                map.insert("image", STANDARD.encode(data));

                let client = reqwest::Client::new();
                if let Ok(response) = client.post(endpoint).form(&map).send().await {
                    #[derive(Serialize, Deserialize)]
                    struct UploadResponse {
                        url: String,
                    }

                    let result: UploadResponse =
                        response.json().await.map_err(|_| Error::UploadFailed)?;

                    Ok(Some(result.url))
                } else {
                    Err(Error::UploadFailed)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[async_std::test]
    async fn it_skips_upload_when_disabled() {
        assert_eq!(ImageHost::Disabled.upload(b"bytes").await, Ok(None));
    }

    #[async_std::test]
    async fn it_hands_back_a_url_for_dummy_uploads() {
        let url = ImageHost::Dummy.upload(b"bytes").await.unwrap().unwrap();
        assert!(url.starts_with("https://images.invalid/"));
    }
}
