use crate::{
    api::{ApiClient, ApiRequest, MultipartBody, Upload},
    error::ApiError,
    services::{join_ids, types::TestEntity, Envelope},
};

/// Metadata for a question paper upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionPaper {
    pub name: String,
    pub year: String,
    pub kind: String,
}

/// # Errors
/// Returns the transport's classified error.
pub async fn list_all(api: &ApiClient) -> Result<Envelope, ApiError> {
    api.send(ApiRequest::get("/api/qn/admin/getAllQn")).await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn by_subject(api: &ApiClient, subject_id: i64) -> Result<Envelope, ApiError> {
    api.send(ApiRequest::get(format!("/api/qn/user/getQnOnSub/{subject_id}")))
        .await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn images_by_subject(api: &ApiClient, subject_id: i64) -> Result<Envelope, ApiError> {
    api.send(ApiRequest::get(format!("/api/qn/user/getQnImage/{subject_id}")))
        .await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn add(
    api: &ApiClient,
    paper: &QuestionPaper,
    subject_name: &str,
    files: Vec<Upload>,
) -> Result<Envelope, ApiError> {
    let body = MultipartBody::new().files("files", files)?;
    let request = ApiRequest::post("/api/qn/admin/addQn")
        .query("qName", &paper.name)
        .query("qYear", &paper.year)
        .query("qType", &paper.kind)
        .query("subName", subject_name)
        .multipart(body);
    api.send(request).await
}

/// Replaces a paper's metadata, appends `files` and drops the images listed
/// in `delete_ids`.
///
/// # Errors
/// Returns the transport's classified error.
pub async fn update(
    api: &ApiClient,
    question_id: i64,
    paper: &QuestionPaper,
    entity: &TestEntity,
    files: Vec<Upload>,
    delete_ids: &[String],
) -> Result<Envelope, ApiError> {
    let body = MultipartBody::new()
        .json("testEntity", entity)?
        .files("file", files)?;
    let request = ApiRequest::put(format!("/api/qn/admin/updateQn/{question_id}"))
        .query("qName", &paper.name)
        .query("qYear", &paper.year)
        .query("qType", &paper.kind)
        .query_opt("deleteIds", join_ids(delete_ids))
        .multipart(body);
    api.send(request).await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn delete(api: &ApiClient, question_id: i64) -> Result<Envelope, ApiError> {
    api.send(ApiRequest::delete(format!("/api/qn/admin/remove/{question_id}")))
        .await
}
