//! Login and registration payloads

use serde::{Deserialize, Serialize};

use super::user::Gender;

/// Body of `POST /api/users/login`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/users/register`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationProfile {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

/// Body of `POST /oauth/kakao/login`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OAuthCodeRequest {
    pub code: String,
}

/// Result of exchanging an authorization code with the backend
#[derive(Debug, Clone, PartialEq)]
pub enum OAuthExchange {
    /// 200: the account exists; the body is the user snapshot to store
    Existing(serde_json::Value),
    /// 201: no account yet; the body is the provider profile used to prefill signup
    NewUser(serde_json::Value),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_omits_missing_fields() {
        let profile = RegistrationProfile {
            name: "Kim".into(),
            email: "kim@example.com".into(),
            password: "pw".into(),
            height: None,
            weight: Some(70.0),
            age: Some(30),
            gender: Some(Gender::Female),
            goal: None,
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["gender"], "female");
        assert_eq!(json["weight"], 70.0);
        assert!(json.get("height").is_none());
        assert!(json.get("goal").is_none());
    }
}
