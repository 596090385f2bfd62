use crate::{
    api::{ApiClient, ApiRequest, ApiResponse, MultipartBody, Upload},
    error::ApiError,
    services::{
        types::{NotesEntity, NotesPlacement},
        Envelope,
    },
};

/// # Errors
/// Returns the transport's classified error.
pub async fn list_all(api: &ApiClient) -> Result<Envelope, ApiError> {
    api.send(ApiRequest::get("/api/notes/admin/getAllNotes")).await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn by_chapter(api: &ApiClient, chapter_id: i64) -> Result<Envelope, ApiError> {
    api.send(ApiRequest::get(format!(
        "/api/notes/user/getNotesONChap/{chapter_id}"
    )))
    .await
}

/// Adds notes, creating the semester, subject or chapter by name when no id
/// is given for that level.
///
/// # Errors
/// Returns the transport's classified error.
pub async fn add(
    api: &ApiClient,
    content: &str,
    placement: &NotesPlacement,
) -> Result<ApiResponse<NotesEntity>, ApiError> {
    let request = ApiRequest::post("/api/notes/admin/addNotes")
        .query("content", content)
        .query_opt("semesterId", placement.semester_id)
        .query_opt("newSemesterName", placement.new_semester_name.as_deref())
        .query_opt("subjectId", placement.subject_id)
        .query_opt("newSubjectName", placement.new_subject_name.as_deref())
        .query_opt("chapterId", placement.chapter_id)
        .query_opt("newChapterName", placement.new_chapter_name.as_deref());
    api.send(request).await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn update(
    api: &ApiClient,
    chapter_id: i64,
    notes: &NotesEntity,
) -> Result<Envelope, ApiError> {
    let request =
        ApiRequest::put(format!("/api/notes/admin/updateOnChap/{chapter_id}")).json(notes)?;
    api.send(request).await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn delete(api: &ApiClient, chapter_id: i64) -> Result<Envelope, ApiError> {
    api.send(ApiRequest::delete(format!(
        "/api/notes/admin/deleteNotesOnChap/{chapter_id}"
    )))
    .await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn upload_image(api: &ApiClient, image: Upload) -> Result<Envelope, ApiError> {
    let body = MultipartBody::new().file("file", image)?;
    api.send(ApiRequest::post("/api/notes/admin/upload-images").multipart(body))
        .await
}
