//! Upload API Handlers
//!
//! 图片先上传取得 [`ImageRef`]，再随酒店/客房的创建或更新请求提交。

use axum::{Json, extract::Multipart, extract::State};
use shared::models::ImageRef;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// 单张图片大小上限 (5 MiB)
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// POST /api/upload/image - 上传图片 (登录账户)
///
/// multipart 表单，字段名 `file`。
pub async fn upload_image(
    State(state): State<ServerState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<AppResponse<ImageRef>>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::validation("file field must carry a filename"))?;
        let bytes = field.bytes().await?;

        if bytes.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(AppError::validation(format!(
                "Image too large ({} bytes, max {MAX_IMAGE_BYTES})",
                bytes.len()
            )));
        }

        let image = state
            .images
            .upload(&filename, bytes.to_vec())
            .await
            .map_err(|e| match e {
                crate::services::ImageError::UnsupportedType(t) => {
                    AppError::validation(format!("Unsupported image type: {t}"))
                }
                other => AppError::internal(other.to_string()),
            })?;

        tracing::info!(account_id = user.id, public_id = %image.public_id, "Image uploaded");
        return Ok(ok(image));
    }

    Err(AppError::validation("No 'file' field in upload"))
}
