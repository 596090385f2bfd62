//! Request description handed to [`super::ApiClient::send`].

use reqwest::{
    multipart::{Form, Part},
    Method,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

use super::upload::Upload;

/// Body encoding. JSON and empty bodies go out with the JSON content type;
/// multipart bodies carry their own boundary.
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Form),
}

#[derive(Debug)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: RequestBody,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds the parameter only when a value is present.
    #[must_use]
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Encodes `body` as the JSON payload.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` if the body cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let payload = serde_json::to_value(body)
            .map_err(|err| ApiError::validation("body", format!("Failed to encode request: {err}")))?;
        self.body = RequestBody::Json(payload);
        Ok(self)
    }

    #[must_use]
    pub fn multipart(mut self, body: MultipartBody) -> Self {
        self.body = RequestBody::Multipart(body.form);
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn is_multipart(&self) -> bool {
        matches!(self.body, RequestBody::Multipart(_))
    }
}

/// Builder for multipart payloads (notes images, question images, solution
/// files, result PDFs).
#[derive(Debug)]
pub struct MultipartBody {
    form: Form,
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartBody {
    #[must_use]
    pub fn new() -> Self {
        Self { form: Form::new() }
    }

    /// Appends a file part under `field`.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` if the upload's MIME type is invalid.
    pub fn file(self, field: &str, upload: Upload) -> Result<Self, ApiError> {
        let part = upload.into_part()?;
        Ok(Self {
            form: self.form.part(field.to_string(), part),
        })
    }

    /// Appends every upload under the same field name.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` if any upload's MIME type is invalid.
    pub fn files(self, field: &str, uploads: impl IntoIterator<Item = Upload>) -> Result<Self, ApiError> {
        uploads
            .into_iter()
            .try_fold(self, |body, upload| body.file(field, upload))
    }

    #[must_use]
    pub fn text(self, field: &str, value: impl Into<String>) -> Self {
        Self {
            form: self.form.text(field.to_string(), value.into()),
        }
    }

    /// Appends a JSON-encoded text part.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` if the value cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(self, field: &str, value: &T) -> Result<Self, ApiError> {
        let encoded = serde_json::to_string(value)
            .map_err(|err| ApiError::validation("body", format!("Failed to encode {field}: {err}")))?;
        let part = Part::text(encoded)
            .mime_str("application/json")
            .map_err(|err| ApiError::validation("body", err.to_string()))?;
        Ok(Self {
            form: self.form.part(field.to_string(), part),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_opt_skips_missing_values() {
        let request = ApiRequest::post("/api/userinfo/admin/reg")
            .query("uName", "john")
            .query_opt("roleName", None::<String>)
            .query_opt("uEmail", Some("john@example.com"));

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(
            request.query,
            vec![
                ("uName".to_string(), "john".to_string()),
                ("uEmail".to_string(), "john@example.com".to_string()),
            ]
        );
    }

    #[test]
    fn json_body_is_encoded() {
        let request = ApiRequest::post("/x")
            .json(&serde_json::json!({"userName": "a@b.co"}))
            .unwrap();
        match request.body {
            RequestBody::Json(value) => {
                assert_eq!(value, serde_json::json!({"userName": "a@b.co"}));
            }
            other => panic!("unexpected body: {other:?}"),
        }
        assert!(!ApiRequest::get("/x").is_multipart());
    }

    #[test]
    fn multipart_rejects_bad_mime() {
        let upload = Upload::new("a.pdf", b"%PDF".to_vec()).with_mime("not a mime");
        assert!(matches!(
            MultipartBody::new().file("pdfFIle", upload),
            Err(ApiError::Validation { field: "file", .. })
        ));
    }
}
