use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

use super::{missing, non_blank};
use crate::utils::AppError;

/// Document stored in the `users` collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    #[serde(rename = "passwordHash")]
    pub password_hash: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<BsonDateTime>,
}

/// Body of `POST /register` and `POST /login`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Username and plaintext password, both present.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl CredentialsRequest {
    pub fn validate(self) -> Result<Credentials, AppError> {
        let username = non_blank(self.username);
        let password = self.password.filter(|p| !p.is_empty());

        match (username, password) {
            (Some(username), Some(password)) => Ok(Credentials { username, password }),
            (username, password) => Err(missing(&[
                ("username", username.is_none()),
                ("password", password.is_none()),
            ])),
        }
    }
}

/// Public view of a user. Credential material is never part of it.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: user.username,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_username_is_missing() {
        let request = CredentialsRequest {
            username: Some("   ".into()),
            password: Some("secret".into()),
        };
        match request.validate() {
            Err(AppError::MissingFields(fields)) => assert_eq!(fields, vec!["username"]),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn response_omits_password_hash() {
        let user = User {
            id: Some(ObjectId::new()),
            username: "ada".into(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".into(),
            created_at: None,
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert_eq!(json["username"], "ada");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["_id"].as_str().unwrap().len(), 24);
    }
}
