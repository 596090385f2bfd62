use crate::{
    api::{ApiClient, ApiRequest, MultipartBody, Upload},
    error::ApiError,
    services::Envelope,
};

/// # Errors
/// Returns the transport's classified error.
pub async fn list(api: &ApiClient) -> Result<Envelope, ApiError> {
    api.send(ApiRequest::get("/api/results/user/getAllResults"))
        .await
}

/// Publishes a result sheet. The part name `pdfFIle` is what the API expects.
///
/// # Errors
/// Returns the transport's classified error.
pub async fn add(api: &ApiClient, result_name: &str, pdf: Upload) -> Result<Envelope, ApiError> {
    let pdf = if pdf.mime.is_none() {
        pdf.with_mime("application/pdf")
    } else {
        pdf
    };
    let body = MultipartBody::new().file("pdfFIle", pdf)?;
    let request = ApiRequest::post("/api/results/admin/addResults")
        .query("resultName", result_name)
        .multipart(body);
    api.send(request).await
}

/// # Errors
/// Returns the transport's classified error.
pub async fn delete(api: &ApiClient, result_id: i64) -> Result<Envelope, ApiError> {
    api.send(ApiRequest::delete(format!(
        "/api/results/admin/removeResults/{result_id}"
    )))
    .await
}
