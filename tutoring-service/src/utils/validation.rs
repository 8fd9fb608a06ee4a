use serde::de::DeserializeOwned;
use service_core::axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::request::Parts,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

/// JSON body that must pass `validator` rules before a handler sees it.
///
/// Malformed JSON is a 400; a well-formed body failing its rules is a 422.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| {
                AppError::BadRequest(anyhow::anyhow!("Json parse error: {}", e.body_text()))
            })?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// Query string extractor whose failures use the JSON error body.
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| {
                AppError::BadRequest(anyhow::anyhow!("Invalid query string: {}", e.body_text()))
            })?;

        Ok(QueryParams(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use service_core::axum::{body::Body, http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Params {
        page: Option<i64>,
    }

    async fn page(QueryParams(params): QueryParams<Params>) -> String {
        params.page.unwrap_or(1).to_string()
    }

    fn app() -> Router {
        Router::new().route("/items", get(page))
    }

    #[tokio::test]
    async fn test_query_params_pass_through() {
        let res = app()
            .oneshot(Request::builder().uri("/items?page=3").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = res.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"3");
    }

    #[tokio::test]
    async fn test_malformed_query_is_json_bad_request() {
        let res = app()
            .oneshot(Request::builder().uri("/items?page=abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = res.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].as_str().unwrap().starts_with("Invalid query string"));
    }
}
