use ct_core::ports::RemoteError;
use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Extract the `error.message` of a Google API error body, falling back to
/// the raw text.
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        Ok(envelope) if !envelope.error.status.is_empty() => envelope.error.status,
        _ => body.trim().to_string(),
    }
}

/// Map an Identity Toolkit failure. The service reports the reason as an
/// upper-case code at the start of the message, e.g.
/// `WEAK_PASSWORD : Password should be at least 6 characters`.
pub(crate) fn map_auth_error(status: StatusCode, body: &str) -> RemoteError {
    let message = error_message(body);
    let code = message
        .split([' ', ':'])
        .next()
        .unwrap_or_default()
        .to_string();

    match code.as_str() {
        "EMAIL_EXISTS" => RemoteError::Conflict(message),
        "EMAIL_NOT_FOUND"
        | "INVALID_PASSWORD"
        | "INVALID_LOGIN_CREDENTIALS"
        | "INVALID_EMAIL"
        | "MISSING_EMAIL"
        | "MISSING_PASSWORD"
        | "WEAK_PASSWORD"
        | "USER_DISABLED"
        | "TOO_MANY_ATTEMPTS_TRY_LATER" => RemoteError::Auth(message),
        "OPERATION_NOT_ALLOWED" | "PERMISSION_DENIED" => RemoteError::PermissionDenied(message),
        _ => map_status_code(status, message),
    }
}

pub(crate) fn map_status_code(code: StatusCode, message: String) -> RemoteError {
    match code {
        StatusCode::UNAUTHORIZED => RemoteError::Auth(message),
        StatusCode::FORBIDDEN => RemoteError::PermissionDenied(message),
        StatusCode::NOT_FOUND => RemoteError::NotFound(message),
        StatusCode::CONFLICT => RemoteError::Conflict(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => RemoteError::Network(message),
        _ => RemoteError::Service(format!("{code}: {message}")),
    }
}

pub(crate) fn map_transport_error(error: reqwest::Error) -> RemoteError {
    if error.is_decode() {
        RemoteError::Service(format!("unexpected response: {error}"))
    } else if let Some(status) = error.status() {
        map_status_code(status, error.to_string())
    } else {
        RemoteError::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(message: &str) -> String {
        serde_json::json!({"error": {"code": 400, "message": message}}).to_string()
    }

    #[test]
    fn email_exists_is_conflict() {
        let err = map_auth_error(StatusCode::BAD_REQUEST, &body("EMAIL_EXISTS"));
        assert_eq!(err, RemoteError::Conflict("EMAIL_EXISTS".to_string()));
    }

    #[test]
    fn weak_password_keeps_full_message() {
        let message = "WEAK_PASSWORD : Password should be at least 6 characters";
        let err = map_auth_error(StatusCode::BAD_REQUEST, &body(message));
        assert_eq!(err, RemoteError::Auth(message.to_string()));
    }

    #[test]
    fn unknown_code_falls_back_to_status() {
        let err = map_auth_error(StatusCode::SERVICE_UNAVAILABLE, "upstream down");
        assert!(matches!(err, RemoteError::Service(msg) if msg.contains("upstream down")));
    }

    #[test]
    fn firestore_status_mapping() {
        assert!(matches!(
            map_status_code(StatusCode::FORBIDDEN, "no".into()),
            RemoteError::PermissionDenied(_)
        ));
        assert!(matches!(
            map_status_code(StatusCode::UNAUTHORIZED, "no".into()),
            RemoteError::Auth(_)
        ));
    }

    #[test]
    fn status_field_used_when_message_missing() {
        let raw = r#"{"error": {"code": 403, "status": "PERMISSION_DENIED"}}"#;
        assert_eq!(error_message(raw), "PERMISSION_DENIED");
    }
}
