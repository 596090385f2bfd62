use crate::{
    api::{ApiClient, ApiRequest, ApiResponse},
    error::ApiError,
    services::types::SubjectDto,
};

/// # Errors
/// Returns the transport's classified error.
pub async fn list(api: &ApiClient) -> Result<ApiResponse<Vec<SubjectDto>>, ApiError> {
    api.send(ApiRequest::get("/api/mapping/admin/sub")).await
}
