use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Access/refresh pair. The login endpoint returns it either at the top
/// level or nested under `tokens`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LoginResponse {
    Nested { tokens: TokenPair },
    Flat(TokenPair),
}

impl LoginResponse {
    pub fn into_tokens(self) -> TokenPair {
        match self {
            LoginResponse::Nested { tokens } => tokens,
            LoginResponse::Flat(tokens) => tokens,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn login_response_accepts_nested_and_flat_tokens() {
        let nested: LoginResponse = serde_json::from_value(json!({
            "user": {"id": 1},
            "tokens": {"access": "a1", "refresh": "r1"}
        }))
        .unwrap();
        assert_eq!(nested.into_tokens().access, "a1");

        let flat: LoginResponse =
            serde_json::from_value(json!({"access": "a2", "refresh": "r2"})).unwrap();
        assert_eq!(flat.into_tokens().refresh, "r2");
    }
}
