use axum::{
    http::{header::RETRY_AFTER, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

/// Application error taxonomy with stable machine-readable codes.
///
/// Processing failures (YouTube, website, transcription, summarization) are
/// ordinary request outcomes and map to 422; only transport-level surprises
/// map to 500.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),
    #[error("Rate limit exceeded. Try again in {retry_after} seconds.")]
    RateLimited { retry_after: u64 },
    #[error("{0}")]
    Youtube(String),
    #[error("{0}")]
    Website(String),
    #[error("{0}")]
    Transcription(String),
    #[error("{0}")]
    Summarization(String),
    #[error("{0}")]
    Config(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::RateLimited { .. } => "RATE_LIMIT_ERROR",
            Error::Youtube(_) => "YOUTUBE_ERROR",
            Error::Website(_) => "WEBSITE_ERROR",
            Error::Transcription(_) => "TRANSCRIPTION_ERROR",
            Error::Summarization(_) => "SUMMARIZATION_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Http(_) => "HTTP_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Error::Youtube(_)
            | Error::Website(_)
            | Error::Transcription(_)
            | Error::Summarization(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Config(_) | Error::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error_code": self.error_code(),
            "message": self.to_string(),
        });
        let mut response = (status, Json(body)).into_response();
        if let Error::RateLimited { retry_after } = self {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processing_errors_map_to_422() {
        for err in [
            Error::Youtube("x".into()),
            Error::Website("x".into()),
            Error::Transcription("x".into()),
            Error::Summarization("x".into()),
        ] {
            assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn rate_limit_message_names_the_wait() {
        let err = Error::RateLimited { retry_after: 58 };
        assert_eq!(err.error_code(), "RATE_LIMIT_ERROR");
        assert_eq!(
            err.to_string(),
            "Rate limit exceeded. Try again in 58 seconds."
        );
    }
}
