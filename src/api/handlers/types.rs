//! Request/response bodies for the HTTP API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("password", &"***")
            .finish()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    #[serde(rename = "sessionString")]
    pub session_string: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SessionRequest {
    #[serde(rename = "sessionString", default)]
    pub session_string: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn session_request_uses_camel_case_field() -> Result<()> {
        let request: SessionRequest = serde_json::from_str(r#"{"sessionString":"abc"}"#)?;
        assert_eq!(request.session_string, "abc");

        let missing: SessionRequest = serde_json::from_str("{}")?;
        assert!(missing.session_string.is_empty());
        Ok(())
    }

    #[test]
    fn login_request_debug_hides_password() -> Result<()> {
        let request: LoginRequest = serde_json::from_str(r#"{"password":"secret123"}"#)?;
        assert_eq!(request.password, "secret123");
        assert!(!format!("{request:?}").contains("secret123"));
        Ok(())
    }

    #[test]
    fn login_response_shape() -> Result<()> {
        let value = serde_json::to_value(LoginResponse {
            session_string: "f00d".to_string(),
        })?;
        assert_eq!(value, serde_json::json!({ "sessionString": "f00d" }));
        Ok(())
    }
}
