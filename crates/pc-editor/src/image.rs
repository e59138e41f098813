//! Image source boundary.
//!
//! The editor only needs an image's natural size to place it; the bytes are
//! fetched by the host. [`BytesImageLoader`] adapts any async byte fetcher and
//! reads the size by decoding the data.

use image::GenericImageView;
use std::future::Future;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("could not decode image: {0}")]
    Decode(String),
    #[error("image has zero size")]
    Empty,
}

/// A fetched image, ready to place.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub src: String,
    pub width: f64,
    pub height: f64,
}

pub trait ImageLoader {
    fn load(&self, url: &str) -> impl Future<Output = Result<LoadedImage, ImageError>>;
}

/// Loader over an async fetcher returning raw bytes.
pub struct BytesImageLoader<F> {
    fetch: F,
}

impl<F, Fut> BytesImageLoader<F>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<Vec<u8>, String>>,
{
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

impl<F, Fut> ImageLoader for BytesImageLoader<F>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<Vec<u8>, String>>,
{
    async fn load(&self, url: &str) -> Result<LoadedImage, ImageError> {
        let bytes = (self.fetch)(url.to_string())
            .await
            .map_err(|reason| ImageError::Fetch {
                url: url.to_string(),
                reason,
            })?;
        let decoded =
            image::load_from_memory(&bytes).map_err(|e| ImageError::Decode(e.to_string()))?;
        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageError::Empty);
        }
        log::trace!("loaded {url}: {width}x{height}");
        Ok(LoadedImage {
            src: url.to_string(),
            width: f64::from(width),
            height: f64::from(height),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageOutputFormat, RgbaImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(RgbaImage::new(width, height))
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        bytes
    }

    #[tokio::test]
    async fn decodes_dimensions() {
        let data = png(3, 2);
        let loader = BytesImageLoader::new(move |_url| {
            let data = data.clone();
            async move { Ok::<_, String>(data) }
        });
        let img = loader.load("https://img/cat.png").await.unwrap();
        assert_eq!(
            img,
            LoadedImage {
                src: "https://img/cat.png".into(),
                width: 3.0,
                height: 2.0
            }
        );
    }

    #[tokio::test]
    async fn fetch_and_decode_failures() {
        let failing = BytesImageLoader::new(|_url| async { Err::<Vec<u8>, _>("404".to_string()) });
        assert!(matches!(
            failing.load("x").await,
            Err(ImageError::Fetch { .. })
        ));

        let garbage = BytesImageLoader::new(|_url| async { Ok::<_, String>(b"nope".to_vec()) });
        assert!(matches!(garbage.load("x").await, Err(ImageError::Decode(_))));
    }
}
