//! Socket-free request routing.

use serde::Serialize;

use crate::server::api::{self, ApiError, SolveMode};

/// A complete response, ready to be written to the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    fn json(status_code: u16, body: String) -> Self {
        Self {
            status_code,
            content_type: "application/json",
            body,
        }
    }

    fn ok(body: String) -> Self {
        Self::json(200, body)
    }

    /// `{status: "error", message}` with the given status code.
    fn error(status_code: u16, message: &str) -> Self {
        Self::encoded(
            status_code,
            &serde_json::json!({ "status": "error", "message": message }),
        )
    }

    fn encoded<T: Serialize>(status_code: u16, payload: &T) -> Self {
        match serde_json::to_string_pretty(payload) {
            Ok(body) => Self::json(status_code, body),
            Err(_) => Self::json(
                500,
                r#"{"status":"error","message":"failed to encode response"}"#.to_string(),
            ),
        }
    }

    pub fn status_text(&self) -> &'static str {
        match self.status_code {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            _ => "Internal Server Error",
        }
    }

    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text(),
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

/// Dispatches one request. Query strings are ignored.
pub fn route_request(method: &str, path: &str, body: &str) -> HttpResponse {
    let path = path.split_once('?').map_or(path, |(route, _)| route);

    let result = match (method, path) {
        ("GET", "/api/health") => api::health_payload().map_err(ApiError::Encode),
        ("GET", _) if path.starts_with(COMBINATIONS_PREFIX) => {
            api::combinations_payload(&path[COMBINATIONS_PREFIX.len()..])
        }
        ("POST", "/api/rating") => api::rating_payload(body),
        ("POST", "/api/stats") => api::stats_payload(body),
        ("POST", "/api/validate") => api::validate_squad_payload(body),
        ("POST", "/api/minimum") => api::minimum_payload(body),
        ("POST", "/api/solve") => api::solve_payload(body, SolveMode::Cheapest),
        ("POST", "/api/solve/efficient") => api::solve_payload(body, SolveMode::MostEfficient),
        ("POST", "/api/solve/optimal") => api::optimal_payload(body),
        ("POST", "/api/solve/estimate") => api::estimate_payload(body),
        _ => return HttpResponse::error(404, "Route not found"),
    };

    match result {
        Ok(payload) => HttpResponse::ok(payload),
        Err(err) => error_response(err),
    }
}

const COMBINATIONS_PREFIX: &str = "/api/combinations/";

fn error_response(err: ApiError) -> HttpResponse {
    match err {
        ApiError::Parse(err) => HttpResponse::error(400, &format!("Invalid request body: {err}")),
        ApiError::Validation(payload) => HttpResponse::encoded(400, &payload),
        ApiError::NotFound(message) => HttpResponse::error(404, &message),
        err @ ApiError::Encode(_) => HttpResponse::error(500, &err.to_string()),
    }
}
