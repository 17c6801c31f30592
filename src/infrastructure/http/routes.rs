//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                     GET   健康检查
//! - /api/voice/library            GET   Perzona Library 预置音色列表
//! - /api/voice/library/{id}       GET   单个预置音色
//! - /api/storage/presign          POST  对象预签名 GET 地址（1 小时有效，需登录）
//! - /api/auth/sign-up/email       POST  邮箱注册
//! - /api/auth/sign-in/email       POST  邮箱登录
//! - /api/auth/get-session         GET   当前会话（Bearer token）
//! - /api/auth/sign-out            POST  登出（Bearer token）
//! - /api/speech/generate          POST  生成语音（需登录）
//! - /api/video/generate           POST  照片 + 音频生成视频（需登录）
//! - /api/file/import              POST  从 URL 导入文件（需登录）

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::middleware::{require_session, trusted_origin_guard};
use super::state::AppState;

/// 创建所有路由
pub fn create_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes(state))
}

/// API 路由
fn api_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/voice", voice_routes())
        .nest("/auth", auth_routes(state))
        .merge(protected_routes(state))
}

/// 需要会话的路由：签名地址和后端任务
fn protected_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/storage/presign", post(handlers::presign_object))
        .route("/speech/generate", post(handlers::generate_speech))
        .route("/video/generate", post(handlers::generate_video))
        .route("/file/import", post(handlers::import_file))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ))
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/library", get(handlers::list_library_voices))
        .route("/library/:voice_id", get(handlers::get_library_voice))
}

/// Auth 路由，写操作校验 Origin
fn auth_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/sign-up/email", post(handlers::sign_up_email))
        .route("/sign-in/email", post(handlers::sign_in_email))
        .route("/get-session", get(handlers::get_session))
        .route("/sign-out", post(handlers::sign_out))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            trusted_origin_guard,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        FileImportRequest, SpeechError, SpeechRequest, SpeechServicePort, StoredObject,
        VideoRequest,
    };
    use crate::infrastructure::adapters::{Argon2PasswordHasher, S3Presigner, S3PresignerConfig};
    use crate::infrastructure::http::state::AuthSettings;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteSessionRepository,
        SqliteUserRepository,
    };
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tower::util::ServiceExt;

    #[derive(Default)]
    struct RecordingSpeechService {
        voice_keys: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl SpeechServicePort for RecordingSpeechService {
        async fn generate_speech(
            &self,
            request: SpeechRequest,
        ) -> Result<StoredObject, SpeechError> {
            self.voice_keys.lock().unwrap().push(request.voice_s3_key);
            Ok(StoredObject {
                s3_key: "tts/out.wav".to_string(),
            })
        }

        async fn generate_video(&self, request: VideoRequest) -> Result<StoredObject, SpeechError> {
            Ok(StoredObject {
                s3_key: format!("ptv/{}.mp4", request.audio_s3_key.trim_end_matches(".wav")),
            })
        }

        async fn import_file(
            &self,
            _request: FileImportRequest,
        ) -> Result<StoredObject, SpeechError> {
            Ok(StoredObject {
                s3_key: "file/in.mp4".to_string(),
            })
        }
    }

    async fn test_app() -> (Router, Arc<RecordingSpeechService>) {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let presigner = S3Presigner::new(S3PresignerConfig::new(
            "perzona-bucket",
            "eu-west-3",
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
        ))
        .unwrap();
        let speech = Arc::new(RecordingSpeechService::default());

        let state = Arc::new(AppState::new(
            Arc::new(SqliteUserRepository::new(pool.clone())),
            Arc::new(SqliteSessionRepository::new(pool)),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(presigner),
            speech.clone(),
            AuthSettings::default(),
        ));

        (create_routes(&state).with_state(state), speech)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn bearer_request(method: Method, uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    async fn call(app: &Router, request: Request<Body>) -> Value {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sign_up_body() -> Value {
        json!({"name": "Ada", "email": "Ada@Example.com", "password": "hunter2hunter2"})
    }

    /// 注册并返回会话 token
    async fn signed_in(app: &Router) -> String {
        let body = call(
            app,
            json_request(Method::POST, "/api/auth/sign-up/email", sign_up_body()),
        )
        .await;
        body["data"]["token"].as_str().unwrap().to_string()
    }

    fn authed_request(uri: &str, token: &str, body: Value) -> Request<Body> {
        let mut request = json_request(Method::POST, uri, body);
        request.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );
        request
    }

    #[tokio::test]
    async fn test_ping() {
        let (app, _) = test_app().await;
        let request = Request::builder()
            .uri("/api/ping")
            .body(Body::empty())
            .unwrap();
        let body = call(&app, request).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_library_listing() {
        let (app, _) = test_app().await;
        let request = Request::builder()
            .uri("/api/voice/library")
            .body(Body::empty())
            .unwrap();

        let body = call(&app, request).await;
        assert_eq!(body["errno"], 0);
        let voices = body["data"].as_array().unwrap();
        assert_eq!(voices.len(), 3);
        assert_eq!(voices[0]["id"], "v1");
        assert_eq!(voices[0]["tags"], json!(["Deep", "American", "Assertive"]));
        assert_eq!(voices[2]["s3_key"], "samples/voices/zuck.wav");
    }

    #[tokio::test]
    async fn test_unknown_library_voice() {
        let (app, _) = test_app().await;
        let request = Request::builder()
            .uri("/api/voice/library/v42")
            .body(Body::empty())
            .unwrap();

        let body = call(&app, request).await;
        assert_eq!(body["errno"], 404);
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_presign_defaults_to_one_hour() {
        let (app, _) = test_app().await;
        let token = signed_in(&app).await;
        let body = call(
            &app,
            authed_request("/api/storage/presign", &token, json!({"key": "tts/a b.wav"})),
        )
        .await;

        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["expires_in"], 3600);
        let url = body["data"]["url"].as_str().unwrap();
        assert!(url.starts_with(
            "https://perzona-bucket.s3.eu-west-3.amazonaws.com/tts/a%20b.wav?"
        ));
        assert!(url.contains("X-Amz-Expires=3600"));
        assert!(url.contains("X-Amz-Signature="));
    }

    #[tokio::test]
    async fn test_presign_empty_key() {
        let (app, _) = test_app().await;
        let token = signed_in(&app).await;
        let body = call(
            &app,
            authed_request("/api/storage/presign", &token, json!({"key": ""})),
        )
        .await;
        assert_eq!(body["errno"], 400);
    }

    #[tokio::test]
    async fn test_auth_flow() {
        let (app, _) = test_app().await;

        let signed_up = call(
            &app,
            json_request(Method::POST, "/api/auth/sign-up/email", sign_up_body()),
        )
        .await;
        assert_eq!(signed_up["errno"], 0);
        assert_eq!(signed_up["data"]["user"]["email"], "ada@example.com");

        let signed_in = call(
            &app,
            json_request(
                Method::POST,
                "/api/auth/sign-in/email",
                json!({"email": "ada@example.com", "password": "hunter2hunter2"}),
            ),
        )
        .await;
        assert_eq!(signed_in["errno"], 0);
        let token = signed_in["data"]["token"].as_str().unwrap().to_string();

        let session = call(
            &app,
            bearer_request(Method::GET, "/api/auth/get-session", &token),
        )
        .await;
        assert_eq!(session["errno"], 0);
        assert_eq!(session["data"]["user"]["name"], "Ada");

        let signed_out = call(
            &app,
            bearer_request(Method::POST, "/api/auth/sign-out", &token),
        )
        .await;
        assert_eq!(signed_out["errno"], 0);

        let after = call(
            &app,
            bearer_request(Method::GET, "/api/auth/get-session", &token),
        )
        .await;
        assert_eq!(after["errno"], 0);
        assert!(after["data"].is_null());
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_conflicts() {
        let (app, _) = test_app().await;
        call(
            &app,
            json_request(Method::POST, "/api/auth/sign-up/email", sign_up_body()),
        )
        .await;

        let again = call(
            &app,
            json_request(Method::POST, "/api/auth/sign-up/email", sign_up_body()),
        )
        .await;
        assert_eq!(again["errno"], 409);
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let (app, _) = test_app().await;
        call(
            &app,
            json_request(Method::POST, "/api/auth/sign-up/email", sign_up_body()),
        )
        .await;

        let body = call(
            &app,
            json_request(
                Method::POST,
                "/api/auth/sign-in/email",
                json!({"email": "ada@example.com", "password": "not-the-password"}),
            ),
        )
        .await;
        assert_eq!(body["errno"], 401);
        assert_eq!(body["error"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_untrusted_origin_rejected() {
        let (app, _) = test_app().await;
        let mut request = json_request(Method::POST, "/api/auth/sign-up/email", sign_up_body());
        request
            .headers_mut()
            .insert(header::ORIGIN, "https://evil.test".parse().unwrap());

        let body = call(&app, request).await;
        assert_eq!(body["errno"], 403);
    }

    #[tokio::test]
    async fn test_trusted_origin_allowed() {
        let (app, _) = test_app().await;
        let mut request = json_request(Method::POST, "/api/auth/sign-up/email", sign_up_body());
        request
            .headers_mut()
            .insert(header::ORIGIN, "http://localhost:3000".parse().unwrap());

        let body = call(&app, request).await;
        assert_eq!(body["errno"], 0);
    }

    #[tokio::test]
    async fn test_sign_out_without_token() {
        let (app, _) = test_app().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/auth/sign-out")
            .body(Body::empty())
            .unwrap();

        let body = call(&app, request).await;
        assert_eq!(body["errno"], 401);
    }

    #[tokio::test]
    async fn test_generate_speech_with_library_voice() {
        let (app, speech) = test_app().await;
        let token = signed_in(&app).await;
        let body = call(
            &app,
            authed_request(
                "/api/speech/generate",
                &token,
                json!({"text": "Hello there", "voice_id": "v2"}),
            ),
        )
        .await;

        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["s3_key"], "tts/out.wav");
        assert_eq!(
            *speech.voice_keys.lock().unwrap(),
            vec![Some("samples/voices/harris.wav".to_string())]
        );
    }

    #[tokio::test]
    async fn test_import_rejects_non_http_url() {
        let (app, _) = test_app().await;
        let token = signed_in(&app).await;
        let body = call(
            &app,
            authed_request(
                "/api/file/import",
                &token,
                json!({"video_url": "ftp://files.test/clip.mp4"}),
            ),
        )
        .await;
        assert_eq!(body["errno"], 400);
    }

    #[tokio::test]
    async fn test_generate_video() {
        let (app, _) = test_app().await;
        let token = signed_in(&app).await;
        let body = call(
            &app,
            authed_request(
                "/api/video/generate",
                &token,
                json!({
                    "transcript": "Hello there",
                    "photo_s3_key": "photos/me.png",
                    "audio_s3_key": "/tts/out.wav"
                }),
            ),
        )
        .await;

        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["s3_key"], "ptv/tts/out.mp4");
    }

    #[tokio::test]
    async fn test_generate_video_requires_photo() {
        let (app, _) = test_app().await;
        let token = signed_in(&app).await;
        let body = call(
            &app,
            authed_request(
                "/api/video/generate",
                &token,
                json!({"transcript": "Hello", "photo_s3_key": " ", "audio_s3_key": "tts/out.wav"}),
            ),
        )
        .await;
        assert_eq!(body["errno"], 400);
    }

    async fn assert_requires_session(uri: &str, body: Value) {
        let (app, speech) = test_app().await;

        let anonymous = call(&app, json_request(Method::POST, uri, body.clone())).await;
        assert_eq!(anonymous["errno"], 401);
        assert!(anonymous["data"].is_null());

        let forged = call(&app, authed_request(uri, "not-a-session", body)).await;
        assert_eq!(forged["errno"], 401);

        assert!(speech.voice_keys.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_presign_requires_session() {
        assert_requires_session(
            "/api/storage/presign",
            json!({"key": "users/someone-else/custom_voice.wav"}),
        )
        .await;
    }

    #[tokio::test]
    async fn test_generate_speech_requires_session() {
        assert_requires_session(
            "/api/speech/generate",
            json!({"text": "Hello there", "voice_id": "v1"}),
        )
        .await;
    }

    #[tokio::test]
    async fn test_generate_video_requires_session() {
        assert_requires_session(
            "/api/video/generate",
            json!({"transcript": "Hi", "photo_s3_key": "p.png", "audio_s3_key": "a.wav"}),
        )
        .await;
    }

    #[tokio::test]
    async fn test_import_requires_session() {
        assert_requires_session(
            "/api/file/import",
            json!({"video_url": "https://files.test/clip.mp4"}),
        )
        .await;
    }

    #[tokio::test]
    async fn test_signed_out_token_loses_access() {
        let (app, _) = test_app().await;
        let token = signed_in(&app).await;

        call(
            &app,
            bearer_request(Method::POST, "/api/auth/sign-out", &token),
        )
        .await;

        let body = call(
            &app,
            authed_request("/api/storage/presign", &token, json!({"key": "tts/a.wav"})),
        )
        .await;
        assert_eq!(body["errno"], 401);
    }
}
