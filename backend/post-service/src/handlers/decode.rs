/// Request body decoding
use crate::error::{AppError, Result};
use actix_web::{HttpMessage, HttpRequest};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Decode and validate a JSON request body into `T`.
///
/// An empty body, a non-JSON `Content-Type`, malformed JSON, a payload of the
/// wrong shape, and a payload failing validation all yield `BadRequest`. A
/// missing `Content-Type` is accepted and treated as JSON.
pub fn decode_body<T>(req: &HttpRequest, body: &[u8]) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest("missing request body".to_string()));
    }

    let mime = req
        .mime_type()
        .map_err(|e| AppError::BadRequest(format!("invalid content type: {}", e)))?;
    if let Some(mime) = mime {
        let is_json = mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON);
        if !is_json {
            return Err(AppError::BadRequest(format!(
                "unsupported content type '{}', expected application/json",
                mime
            )));
        }
    }

    let payload: T = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))?;
    payload.validate()?;

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreatePostRequest, UpdatePostRequest};
    use actix_web::http::header;
    use actix_web::test::TestRequest;

    fn json_request() -> HttpRequest {
        TestRequest::post()
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .to_http_request()
    }

    fn assert_bad_request<T: std::fmt::Debug>(result: Result<T>) {
        assert!(
            matches!(result, Err(AppError::BadRequest(_))),
            "expected BadRequest, got {:?}",
            result
        );
    }

    #[test]
    fn decodes_valid_payload() {
        let req: CreatePostRequest =
            decode_body(&json_request(), br#"{"content":"hello"}"#).unwrap();
        assert_eq!(req.content, "hello");
    }

    #[test]
    fn missing_content_type_is_treated_as_json() {
        let req = TestRequest::post().to_http_request();
        let payload: CreatePostRequest = decode_body(&req, br#"{"content":"hi"}"#).unwrap();
        assert_eq!(payload.content, "hi");
    }

    #[test]
    fn vendor_json_suffix_is_accepted() {
        let req = TestRequest::post()
            .insert_header((header::CONTENT_TYPE, "application/vnd.posts+json"))
            .to_http_request();
        let payload: CreatePostRequest = decode_body(&req, br#"{"content":"hi"}"#).unwrap();
        assert_eq!(payload.content, "hi");
    }

    #[test]
    fn empty_body_is_rejected() {
        assert_bad_request(decode_body::<CreatePostRequest>(&json_request(), b""));
        assert_bad_request(decode_body::<CreatePostRequest>(&json_request(), b"  \n"));
    }

    #[test]
    fn missing_required_field_is_rejected() {
        assert_bad_request(decode_body::<CreatePostRequest>(&json_request(), b"{}"));
    }

    #[test]
    fn empty_content_fails_validation() {
        assert_bad_request(decode_body::<CreatePostRequest>(
            &json_request(),
            br#"{"content":""}"#,
        ));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert_bad_request(decode_body::<CreatePostRequest>(
            &json_request(),
            br#"{"content":"#,
        ));
    }

    #[test]
    fn non_json_content_type_is_rejected() {
        let req = TestRequest::post()
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .to_http_request();
        assert_bad_request(decode_body::<CreatePostRequest>(
            &req,
            br#"{"content":"hello"}"#,
        ));
    }

    #[test]
    fn partial_payload_allows_missing_fields() {
        let update: UpdatePostRequest = decode_body(&json_request(), b"{}").unwrap();
        assert!(update.content.is_none());
    }
}
