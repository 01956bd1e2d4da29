//! 图片存储
//!
//! Hotels and rooms carry image references ([`ImageRef`]); the blobs
//! live behind this trait. Deleting a hotel or replacing an image set
//! destroys the old blobs in bulk; partial failures are aggregated
//! rather than aborting at the first one.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::future::join_all;
use shared::models::ImageRef;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("Invalid image id: {0}")]
    InvalidId(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// 批量删除的部分失败 (失败的 public_id 列表)
    #[error("Failed to destroy images: {0:?}")]
    PartialDestroy(Vec<String>),
}

/// 图片存储
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// 保存一张图片，返回可嵌入记录的引用
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<ImageRef, ImageError>;

    /// 删除一张图片
    async fn destroy(&self, public_id: &str) -> Result<(), ImageError>;

    /// 批量删除；逐张尝试，汇总失败项
    async fn destroy_all(&self, images: &[ImageRef]) -> Result<(), ImageError> {
        let results = join_all(images.iter().map(|img| self.destroy(&img.public_id))).await;

        let failed: Vec<String> = images
            .iter()
            .zip(results)
            .filter_map(|(img, res)| res.is_err().then(|| img.public_id.clone()))
            .collect();

        if failed.is_empty() {
            Ok(())
        } else {
            Err(ImageError::PartialDestroy(failed))
        }
    }
}

/// 本地文件系统存储 (默认装配)
///
/// 图片写入 `<root>/uploads/`，`public_id` 即文件名。
pub struct LocalImageStore {
    dir: PathBuf,
    base_url: String,
}

impl LocalImageStore {
    pub fn new(work_dir: &Path, base_url: impl Into<String>) -> Self {
        Self {
            dir: work_dir.join("uploads"),
            base_url: base_url.into(),
        }
    }

    fn extension_for(filename: &str) -> Result<&'static str, ImageError> {
        let mime = mime_guess::from_path(filename).first_or_octet_stream();
        match mime.essence_str() {
            "image/jpeg" => Ok("jpg"),
            "image/png" => Ok("png"),
            "image/webp" => Ok("webp"),
            "image/gif" => Ok("gif"),
            other => Err(ImageError::UnsupportedType(other.to_string())),
        }
    }

    /// public_id 必须是单个文件名，拒绝路径穿越
    fn checked_path(&self, public_id: &str) -> Result<PathBuf, ImageError> {
        if public_id.is_empty()
            || public_id.contains('/')
            || public_id.contains('\\')
            || public_id.contains("..")
        {
            return Err(ImageError::InvalidId(public_id.to_string()));
        }
        Ok(self.dir.join(public_id))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<ImageRef, ImageError> {
        let ext = Self::extension_for(filename)?;
        let public_id = format!("{}.{ext}", uuid::Uuid::new_v4().simple());
        let path = self.dir.join(&public_id);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ImageError::Storage(e.to_string()))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ImageError::Storage(e.to_string()))?;

        Ok(ImageRef {
            secure_url: format!("{}/uploads/{public_id}", self.base_url),
            public_id,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), ImageError> {
        let path = self.checked_path(public_id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Destroying an already-missing blob is not a failure
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ImageError::Storage(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_then_destroy_roundtrip() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = LocalImageStore::new(tmp.path(), "http://localhost:3000");

        let image = store
            .upload("lobby.png", vec![1, 2, 3])
            .await
            .expect("upload");
        assert!(image.public_id.ends_with(".png"));
        assert!(image.secure_url.contains("/uploads/"));
        assert!(tmp.path().join("uploads").join(&image.public_id).exists());

        store.destroy(&image.public_id).await.expect("destroy");
        assert!(!tmp.path().join("uploads").join(&image.public_id).exists());
    }

    #[tokio::test]
    async fn destroy_all_reports_each_failure() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = LocalImageStore::new(tmp.path(), "http://localhost:3000");

        let good = store.upload("a.jpg", vec![0]).await.expect("upload");
        let bad = ImageRef {
            secure_url: "http://localhost:3000/uploads/evil".to_string(),
            public_id: "../evil".to_string(),
        };

        let err = store
            .destroy_all(&[good.clone(), bad])
            .await
            .expect_err("traversal id must fail");
        match err {
            ImageError::PartialDestroy(failed) => assert_eq!(failed, vec!["../evil".to_string()]),
            other => panic!("unexpected error: {other}"),
        }
        // The good image was still destroyed
        assert!(!tmp.path().join("uploads").join(&good.public_id).exists());
    }

    #[tokio::test]
    async fn rejects_non_image_uploads() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = LocalImageStore::new(tmp.path(), "http://localhost:3000");
        assert!(store.upload("notes.txt", vec![0]).await.is_err());
    }
}
