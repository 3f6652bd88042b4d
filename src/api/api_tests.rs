#[cfg(test)]
mod chat_api_tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::api::app_state::AppState;
    use crate::config::config::{AppConfig, ExternalApiConfig};
    use crate::engine::dispatcher::Dispatcher;
    use crate::engine::matcher::Matcher;
    use crate::engine::resolver::ResponseResolver;
    use crate::integrations::{ExerciseClient, NutritionClient, WellnessProvider};
    use crate::knowledge::records::IntentRecord;
    use crate::knowledge::store::KnowledgeStore;
    use crate::security::auth::JwtAuth;
    use crate::security::rate_limit::RateLimiter;
    use crate::services::account::create_account_service;
    use crate::services::chat::create_chat_service;
    use crate::storage::repository::{MessageRepository, UserRepository};
    use crate::storage::sqlite::connect_in_memory;

    async fn test_router() -> Router {
        let pool = connect_in_memory().await.unwrap();

        let store = Arc::new(KnowledgeStore {
            intents: vec![IntentRecord {
                tag: "greeting".into(),
                patterns: vec!["hi".into(), "hello".into()],
                responses: vec!["Hi there!".into()],
            }],
            ..KnowledgeStore::default()
        });
        let resolver = Arc::new(ResponseResolver::with_seed(store, Matcher::new(), 11));
        let external = ExternalApiConfig {
            request_timeout: 1,
            ..ExternalApiConfig::default()
        };
        let dispatcher = Arc::new(Dispatcher::new(
            resolver,
            NutritionClient::new(&external),
            ExerciseClient::new(&external),
            WellnessProvider::new(&external),
        ));

        let authenticator = Arc::new(JwtAuth::development());
        let config = AppConfig::development();

        let app_state = AppState::new(
            pool.clone(),
            create_account_service(UserRepository::new(pool.clone()), authenticator.clone()),
            create_chat_service(
                MessageRepository::new(pool.clone()),
                dispatcher,
                config.chatbot.clone(),
            ),
            authenticator,
            RateLimiter::development(),
        );

        crate::api::create_router(app_state)
    }

    async fn send_json(
        router: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = router
            .clone()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }

    async fn signup_token(router: &Router) -> String {
        let (status, body) = send_json(
            router,
            "POST",
            "/api/v1/auth/signup",
            None,
            json!({"username": "alice", "email": "alice@example.com", "password": "password123"}),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_signup_returns_201_with_token() {
        let router = test_router().await;
        let (status, body) = send_json(
            &router,
            "POST",
            "/api/v1/auth/signup",
            None,
            json!({"username": "alice", "email": "alice@example.com", "password": "password123"}),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(body["token"].as_str().is_some());
        assert_eq!(body["user"]["username"], "alice");
        // The password hash must never appear in a response.
        assert!(body["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_signup_with_short_password_returns_400() {
        let router = test_router().await;
        let (status, body) = send_json(
            &router,
            "POST",
            "/api/v1/auth/signup",
            None,
            json!({"username": "alice", "email": "alice@example.com", "password": "short"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_returns_401() {
        let router = test_router().await;
        signup_token(&router).await;

        let (status, _) = send_json(
            &router,
            "POST",
            "/api/v1/auth/login",
            None,
            json!({"username": "alice", "password": "wrong-password"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_chat_without_token_returns_401() {
        let router = test_router().await;
        let (status, _) = send_json(
            &router,
            "POST",
            "/api/v1/chat",
            None,
            json!({"message": "hello"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_chat_round_trip_and_history() {
        let router = test_router().await;
        let token = signup_token(&router).await;

        let (status, body) = send_json(
            &router,
            "POST",
            "/api/v1/chat",
            Some(&token),
            json!({"message": "hello"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], "Hi there!");

        let (status, body) = send_json(
            &router,
            "GET",
            "/api/v1/chat/history",
            Some(&token),
            Value::Null,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["history"][0]["message"], "hello");
        assert_eq!(body["history"][0]["is_user_message"], true);
        assert_eq!(body["history"][1]["is_user_message"], false);
    }

    #[tokio::test]
    async fn test_clear_history() {
        let router = test_router().await;
        let token = signup_token(&router).await;

        send_json(
            &router,
            "POST",
            "/api/v1/chat",
            Some(&token),
            json!({"message": "hello"}),
        )
        .await;

        let (status, body) = send_json(
            &router,
            "DELETE",
            "/api/v1/chat/history",
            Some(&token),
            Value::Null,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], 2);

        let (_, body) = send_json(
            &router,
            "GET",
            "/api/v1/chat/history",
            Some(&token),
            Value::Null,
        )
        .await;
        assert_eq!(body["total"], 0);
    }

    #[tokio::test]
    async fn test_bmi_tool() {
        let router = test_router().await;
        let token = signup_token(&router).await;

        let (status, body) = send_json(
            &router,
            "POST",
            "/api/v1/tools/bmi",
            Some(&token),
            json!({"weight_kg": 70.0, "height_cm": 175.0}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bmi"], 22.9);
        assert_eq!(body["category"], "Normal weight");
    }

    #[tokio::test]
    async fn test_bmi_tool_rejects_bad_input() {
        let router = test_router().await;
        let token = signup_token(&router).await;

        let (status, _) = send_json(
            &router,
            "POST",
            "/api/v1/tools/bmi",
            Some(&token),
            json!({"weight_kg": -1.0, "height_cm": 175.0}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_calorie_tool() {
        let router = test_router().await;
        let token = signup_token(&router).await;

        let (status, body) = send_json(
            &router,
            "POST",
            "/api/v1/tools/calories",
            Some(&token),
            json!({
                "age": 25,
                "weight_kg": 70.0,
                "height_cm": 175.0,
                "sex": "male",
                "activity": "moderate"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["maintenance_calories"], 2594);
        assert_eq!(body["bmr"], 1674);
    }

    #[tokio::test]
    async fn test_user_overview() {
        let router = test_router().await;
        let token = signup_token(&router).await;

        send_json(
            &router,
            "POST",
            "/api/v1/chat",
            Some(&token),
            json!({"message": "hello"}),
        )
        .await;

        let (status, body) = send_json(
            &router,
            "GET",
            "/api/v1/users/me",
            Some(&token),
            Value::Null,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["username"], "alice");
        assert_eq!(body["stats"]["total_messages"], 2);
        assert_eq!(body["stats"]["user_messages"], 1);
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let router = test_router().await;
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/auth/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({"username": "ghost", "password": "nope12"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("X-Content-Type-Options").unwrap(),
            "nosniff"
        );
    }
}
