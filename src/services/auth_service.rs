use mongodb::bson::DateTime as BsonDateTime;

use crate::{
    database::{StoreError, UserRepository},
    models::{CredentialsRequest, User},
    utils::AppError,
};

/// bcrypt work factor used unless `BCRYPT_COST` overrides it.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

// User registration
pub async fn register<R>(users: &R, cost: u32, request: CredentialsRequest) -> Result<User, AppError>
where
    R: UserRepository + ?Sized,
{
    let credentials = request.validate()?;

    let existing = users
        .find_user_by_username(&credentials.username)
        .await
        .map_err(AppError::store("Registration failed"))?;
    if existing.is_some() {
        return Err(AppError::DuplicateUsername);
    }

    let password_hash = hash_password(credentials.password, cost).await?;

    let new_user = User {
        id: None,
        username: credentials.username,
        password_hash,
        created_at: Some(BsonDateTime::now()),
    };

    // A concurrent registration can still win between the lookup and the insert.
    match users.create_user(new_user).await {
        Ok(user) => {
            log::info!("✅ User registered successfully: {}", user.username);
            Ok(user)
        }
        Err(StoreError::AlreadyExists { .. }) => Err(AppError::DuplicateUsername),
        Err(e) => Err(AppError::store("Registration failed")(e)),
    }
}

// User login
pub async fn authenticate<R>(users: &R, request: CredentialsRequest) -> Result<User, AppError>
where
    R: UserRepository + ?Sized,
{
    let credentials = request.validate()?;

    let user = users
        .find_user_by_username(&credentials.username)
        .await
        .map_err(AppError::store("Login error"))?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(credentials.password, user.password_hash.clone()).await? {
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}

async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| {
            log::error!("❌ Password hashing task failed: {}", e);
            AppError::Internal("Registration failed")
        })?
        .map_err(|e| {
            log::error!("❌ Failed to hash password: {}", e);
            AppError::Internal("Registration failed")
        })
}

/// A stored hash bcrypt cannot parse counts as a mismatch.
async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| {
            log::error!("❌ Password verification task failed: {}", e);
            AppError::Internal("Login error")
        })?;

    match verified {
        Ok(valid) => Ok(valid),
        Err(e) => {
            log::warn!("⚠️  Stored password hash rejected by bcrypt: {}", e);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    const TEST_COST: u32 = 4;

    fn credentials(username: &str, password: &str) -> CredentialsRequest {
        CredentialsRequest {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let store = MemoryStore::new();

        let user = register(&store, TEST_COST, credentials("ada", "lovelace"))
            .await
            .unwrap();

        assert!(user.id.is_some());
        assert_ne!(user.password_hash, "lovelace");
        assert!(bcrypt::verify("lovelace", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let store = MemoryStore::new();
        let first = register(&store, TEST_COST, credentials("ada", "first"))
            .await
            .unwrap();

        let second = register(&store, TEST_COST, credentials("ada", "second")).await;
        assert!(matches!(second, Err(AppError::DuplicateUsername)));

        // The first account still logs in with its own password.
        let user = authenticate(&store, credentials("ada", "first")).await.unwrap();
        assert_eq!(user.id, first.id);
    }

    #[tokio::test]
    async fn test_register_requires_both_fields() {
        let store = MemoryStore::new();
        let request = CredentialsRequest {
            username: Some("ada".into()),
            password: None,
        };

        match register(&store, TEST_COST, request).await {
            Err(AppError::MissingFields(fields)) => assert_eq!(fields, vec!["password"]),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_authenticate_failures_are_indistinguishable() {
        let store = MemoryStore::new();
        register(&store, TEST_COST, credentials("ada", "lovelace"))
            .await
            .unwrap();

        let wrong_password = authenticate(&store, credentials("ada", "babbage"))
            .await
            .unwrap_err();
        let unknown_user = authenticate(&store, credentials("grace", "lovelace"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_user, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_corrupt_hash_is_invalid_credentials() {
        let store = MemoryStore::new();
        store
            .create_user(User {
                id: None,
                username: "legacy".into(),
                password_hash: "not-a-bcrypt-hash".into(),
                created_at: None,
            })
            .await
            .unwrap();

        let result = authenticate(&store, credentials("legacy", "anything")).await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }
}
