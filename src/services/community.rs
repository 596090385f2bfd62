use crate::{
    api::{ApiClient, ApiRequest},
    error::ApiError,
    services::Envelope,
};

/// A community question as submitted from the Q&A page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewQuestion {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub tags: Option<String>,
}

/// # Errors
/// Returns `Validation` for an empty title, or the transport's classified error.
pub async fn create_question(api: &ApiClient, question: &NewQuestion) -> Result<Envelope, ApiError> {
    if question.title.trim().is_empty() {
        return Err(ApiError::validation("title", "Title is required"));
    }

    let request = ApiRequest::post("/api/ComQn/user/createQn")
        .query("title", question.title.trim())
        .query("description", &question.description)
        .query_opt("imageUrl", question.image_url.as_deref())
        .query_opt("tags", question.tags.as_deref());
    api.send(request).await
}
