use crate::{
    api::{ApiClient, ApiRequest, ApiResponse, MultipartBody, Upload},
    error::ApiError,
    services::{join_ids, types::SolutionEntity, Envelope},
};

/// # Errors
/// Returns the transport's classified error.
pub async fn list_all(api: &ApiClient) -> Result<Envelope, ApiError> {
    api.send(ApiRequest::get("/api/solution/admin/getAll")).await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn by_id(
    api: &ApiClient,
    solution_id: i64,
) -> Result<ApiResponse<SolutionEntity>, ApiError> {
    api.send(ApiRequest::get(format!(
        "/api/solution/user/updateGet/{solution_id}"
    )))
    .await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn by_subject(
    api: &ApiClient,
    subject_id: i64,
) -> Result<ApiResponse<Vec<SolutionEntity>>, ApiError> {
    api.send(ApiRequest::get(format!(
        "/api/solution/user/getOnSub/{subject_id}"
    )))
    .await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn add(
    api: &ApiClient,
    solution_name: &str,
    subject_name: &str,
    files: Vec<Upload>,
) -> Result<Envelope, ApiError> {
    let body = MultipartBody::new().files("file", files)?;
    let request = ApiRequest::post("/api/solution/admin/addSolution")
        .query("solutionEntity", solution_name)
        .query("subName", subject_name)
        .multipart(body);
    api.send(request).await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn update(
    api: &ApiClient,
    solution_id: i64,
    solution_name: &str,
    files: Vec<Upload>,
    delete_ids: &[String],
) -> Result<Envelope, ApiError> {
    let body = MultipartBody::new().files("files", files)?;
    let request = ApiRequest::put(format!("/api/solution/admin/update/{solution_id}"))
        .query("solName", solution_name)
        .query_opt("deleteIds", join_ids(delete_ids))
        .multipart(body);
    api.send(request).await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn delete(api: &ApiClient, solution_id: i64) -> Result<Envelope, ApiError> {
    api.send(ApiRequest::delete(format!(
        "/api/solution/admin/removeSolution/{solution_id}"
    )))
    .await
}
