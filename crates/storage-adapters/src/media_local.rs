//! Local filesystem implementation of `MediaStore`.
//! Content-addressable storage with directory sharding and thumbnailing.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use mime::Mime;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};
use tokio::fs;

use domains::{DomainError, MediaStore, Result, StoredMedia};

static ALLOWED_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from(["image/jpeg", "image/png", "image/webp", "image/gif"])
});

const THUMB_SIZE: u32 = 480;

pub struct LocalMediaStore {
    /// Root directory for all uploads (e.g. "./data/uploads")
    root: PathBuf,
    /// Public URL prefix the router serves the root under (e.g. "/media")
    url_prefix: String,
}

impl LocalMediaStore {
    pub fn new(root: PathBuf, url_prefix: String) -> Self {
        Self { root, url_prefix }
    }

    /// Sharded path: "ab/cd/<hash>.<ext>"
    fn sharded(&self, hash: &str, file_name: &str) -> PathBuf {
        let mut path = self.root.clone();
        path.push(&hash[0..2]);
        path.push(&hash[2..4]);
        path.push(file_name);
        path
    }

    fn extension(content_type: &Mime) -> &'static str {
        mime_guess::get_mime_extensions(content_type)
            .and_then(|exts| exts.last())
            .copied()
            .unwrap_or("bin")
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    /// Saves an upload under its SHA-256 hash, which also deduplicates
    /// repeated uploads of the same bytes. The image must decode; a bounded
    /// thumbnail is written alongside the original.
    async fn store(&self, data: Bytes, content_type: Mime) -> Result<StoredMedia> {
        if !ALLOWED_TYPES.contains(content_type.essence_str()) {
            return Err(DomainError::Validation(format!(
                "unsupported media type: {content_type}"
            )));
        }

        let img = image::load_from_memory(&data)
            .map_err(|_| DomainError::Validation("file is not a readable image".into()))?;

        let hash = hex::encode(Sha256::digest(&data));
        let file_name = format!("{hash}.{}", Self::extension(&content_type));
        let target = self.sharded(&hash, &file_name);
        let parent = target
            .parent()
            .ok_or_else(|| DomainError::Backend("media root has no parent".into()))?
            .to_path_buf();

        fs::create_dir_all(&parent).await.map_err(DomainError::backend)?;

        if fs::try_exists(&target).await.map_err(DomainError::backend)? {
            tracing::debug!(%hash, "media already stored, reusing");
        } else {
            fs::write(&target, &data).await.map_err(DomainError::backend)?;

            let thumb = img.thumbnail(THUMB_SIZE, THUMB_SIZE).to_rgb8();
            let thumb_path = parent.join(format!("thumb_{hash}.jpg"));
            thumb
                .save_with_format(&thumb_path, image::ImageFormat::Jpeg)
                .map_err(DomainError::backend)?;
        }

        let url = format!(
            "{}/{}/{}/{}",
            self.url_prefix,
            &hash[0..2],
            &hash[2..4],
            file_name
        );
        Ok(StoredMedia { id: hash, url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes() -> Bytes {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 30, 30]));
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        Bytes::from(buf.into_inner())
    }

    fn store() -> LocalMediaStore {
        let dir = std::env::temp_dir().join(format!("vestnik-media-{}", uuid::Uuid::new_v4()));
        LocalMediaStore::new(dir, "/media".into())
    }

    #[tokio::test]
    async fn rejects_disallowed_content_type() {
        let err = store()
            .store(Bytes::from_static(b"%PDF-1.4"), "application/pdf".parse().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn rejects_bytes_that_do_not_decode() {
        let err = store()
            .store(Bytes::from_static(b"not an image"), mime::IMAGE_PNG)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn stores_and_dedupes_by_content_hash() {
        let store = store();
        let first = store.store(png_bytes(), mime::IMAGE_PNG).await.unwrap();
        let second = store.store(png_bytes(), mime::IMAGE_PNG).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.url, second.url);
        assert!(first.url.starts_with("/media/"));
        assert!(first.url.ends_with(".png"));
    }
}
