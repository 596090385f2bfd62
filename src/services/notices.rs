use crate::{
    api::{ApiClient, ApiRequest, ApiResponse},
    error::ApiError,
    services::{types::NoticeEntity, Envelope},
};

/// # Errors
/// Returns the transport's classified error.
pub async fn list(api: &ApiClient) -> Result<ApiResponse<Vec<NoticeEntity>>, ApiError> {
    api.send(ApiRequest::get("/api/notice/user/getAllNotice"))
        .await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn add(api: &ApiClient, name: &str, message: &str) -> Result<Envelope, ApiError> {
    let request = ApiRequest::post("/api/notice/admin/addNotice")
        .query("noticeName", name)
        .query("noticeMessage", message);
    api.send(request).await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn update(
    api: &ApiClient,
    notice_id: i64,
    notice: &NoticeEntity,
) -> Result<ApiResponse<NoticeEntity>, ApiError> {
    let request =
        ApiRequest::put(format!("/api/notice/admin/updateNotice/{notice_id}")).json(notice)?;
    api.send(request).await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn delete(api: &ApiClient, notice_id: i64) -> Result<Envelope, ApiError> {
    api.send(ApiRequest::delete(format!(
        "/api/notice/admin/removeNotice/{notice_id}"
    )))
    .await
}
