use actix_web::{web, HttpResponse};

use crate::{
    models::{AuthResponse, CredentialsRequest},
    services::auth_service,
    state::AppState,
    utils::AppError,
};

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "User registered", body = AuthResponse),
        (status = 400, description = "Username taken, missing fields or malformed body")
    )
)]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let username = request.username.clone().unwrap_or_else(|| "N/A".to_string());
    log::info!("📝 POST /register - username: {}", username);

    match auth_service::register(state.store.as_ref(), state.bcrypt_cost, request).await {
        Ok(user) => Ok(HttpResponse::Ok().json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: user.into(),
        })),
        Err(e) => {
            log::warn!("❌ Registration failed: {} - {}", username, e);
            Err(e)
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing fields or malformed body"),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let username = request.username.clone().unwrap_or_else(|| "N/A".to_string());
    log::info!("🔐 POST /login - username: {}", username);

    match auth_service::authenticate(state.store.as_ref(), request).await {
        Ok(user) => {
            log::info!("✅ Login successful: {}", username);
            Ok(HttpResponse::Ok().json(AuthResponse {
                message: "Login successful".to_string(),
                user: user.into(),
            }))
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", username, e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::configure;
    use crate::state::AppState;
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn register_then_login_never_exposes_hash() {
        let state = web::Data::new(AppState::in_memory(4));
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let credentials = json!({ "username": "ada", "password": "lovelace" });

        let resp = test::call_service(
            &app,
            test::TestRequest::post().uri("/register").set_json(&credentials).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let registered: Value = test::read_body_json(resp).await;
        assert_eq!(registered["message"], "User registered successfully");
        assert_eq!(registered["user"]["username"], "ada");
        assert!(registered["user"].get("passwordHash").is_none());
        assert!(registered["user"].get("password").is_none());

        let resp = test::call_service(
            &app,
            test::TestRequest::post().uri("/login").set_json(&credentials).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let logged_in: Value = test::read_body_json(resp).await;
        assert_eq!(logged_in["message"], "Login successful");
        assert_eq!(logged_in["user"]["_id"], registered["user"]["_id"]);
        assert!(logged_in["user"].get("passwordHash").is_none());
    }

    #[actix_web::test]
    async fn duplicate_registration_is_bad_request() {
        let state = web::Data::new(AppState::in_memory(4));
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;
        let credentials = json!({ "username": "ada", "password": "lovelace" });

        let first = test::call_service(
            &app,
            test::TestRequest::post().uri("/register").set_json(&credentials).to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);

        let second = test::call_service(
            &app,
            test::TestRequest::post().uri("/register").set_json(&credentials).to_request(),
        )
        .await;
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(second).await;
        assert_eq!(body["message"], "Username already exists");
    }

    #[actix_web::test]
    async fn wrong_password_and_unknown_user_get_same_401() {
        let state = web::Data::new(AppState::in_memory(4));
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(json!({ "username": "ada", "password": "lovelace" }))
                .to_request(),
        )
        .await;

        let mut bodies = Vec::new();
        for attempt in [
            json!({ "username": "ada", "password": "wrong" }),
            json!({ "username": "grace", "password": "lovelace" }),
        ] {
            let resp = test::call_service(
                &app,
                test::TestRequest::post().uri("/login").set_json(attempt).to_request(),
            )
            .await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            bodies.push(test::read_body_json::<Value, _>(resp).await);
        }

        assert_eq!(bodies[0], bodies[1]);
        assert_eq!(bodies[0]["message"], "Invalid username or password");
    }

    #[actix_web::test]
    async fn malformed_body_is_bad_request() {
        let state = web::Data::new(AppState::in_memory(4));
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .insert_header(("content-type", "application/json"))
                .set_payload("{not json")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Malformed request body"));
    }
}
