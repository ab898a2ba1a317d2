//! Order body extraction
//!
//! `POST /api/order` takes the same fields either as JSON or as a urlencoded
//! form post. A body that cannot be read becomes
//! [`OrderError::MalformedRequest`] instead of axum's rejection status.

use crate::core::{OrderError, OrderRequest};
use axum::Json;
use axum::extract::{Form, FromRequest, Request};
use axum::http::{HeaderMap, header};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// The order submission, whichever encoding it arrived in
#[derive(Debug, Clone)]
pub struct OrderPayload(pub OrderRequest);

impl<S> FromRequest<S> for OrderPayload
where
    S: Send + Sync,
{
    type Rejection = OrderError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(req.headers()) {
            let Form(request) = Form::<OrderRequest>::from_request(req, state)
                .await
                .map_err(|rejection| rejected(rejection.body_text()))?;
            Ok(Self(request))
        } else {
            let Json(request) = Json::<OrderRequest>::from_request(req, state)
                .await
                .map_err(|rejection| rejected(rejection.body_text()))?;
            Ok(Self(request))
        }
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with(FORM_CONTENT_TYPE))
}

fn rejected(detail: String) -> OrderError {
    tracing::error!(error = %detail, "Rejected order body");
    OrderError::MalformedRequest(detail)
}
