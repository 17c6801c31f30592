//! Perzona - 声音克隆服务
//!
//! - Domain: voice/, playback/, chooser/, account/
//! - Application: commands, queries, ports
//! - Infrastructure: http, persistence, adapters

use std::sync::Arc;

use perzona::application::SessionRepositoryPort;
use perzona::config::{load_config, print_config};
use perzona::domain::voice::install_library;
use perzona::infrastructure::adapters::{
    Argon2PasswordHasher, HttpSpeechClient, HttpSpeechClientConfig, S3Presigner,
    S3PresignerConfig,
};
use perzona::infrastructure::http::{AppState, AuthSettings, HttpServer, TrustedOrigins};
use perzona::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteSessionRepository, SqliteUserRepository,
};

/// 过期会话清理间隔
const SESSION_SWEEP_INTERVAL_SECS: u64 = 3600;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},perzona={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Perzona - 声音克隆服务");
    print_config(&config);

    // 音色目录必须在第一次使用前安装
    if let Some(catalog) = config.library.to_catalog()? {
        install_library(catalog)?;
    }

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
    let session_repo = Arc::new(SqliteSessionRepository::new(pool));

    // S3 预签名
    let storage = &config.storage;
    let mut presigner_config = S3PresignerConfig::new(
        &storage.bucket,
        &storage.region,
        &storage.access_key_id,
        &storage.secret_access_key,
    )
    .with_expires_in(storage.presign_expires_secs);
    presigner_config.force_path_style = storage.force_path_style;
    if let Some(endpoint) = &storage.endpoint {
        presigner_config = presigner_config.with_endpoint(endpoint);
    }
    if let Some(token) = &storage.session_token {
        presigner_config = presigner_config.with_session_token(token);
    }
    let url_signer = Arc::new(S3Presigner::new(presigner_config)?);

    // 语音服务客户端
    let mut speech_config =
        HttpSpeechClientConfig::new(&config.speech.generate_url, &config.speech.import_url)
            .with_video_url(&config.speech.video_url)
            .with_timeout(config.speech.timeout_secs);
    if let (Some(key), Some(secret)) = (&config.speech.proxy_key, &config.speech.proxy_secret) {
        speech_config = speech_config.with_proxy_auth(key, secret);
    }
    let speech_service = Arc::new(HttpSpeechClient::new(speech_config)?);

    // 定期清理过期会话
    let sweeper = session_repo.clone();
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(SESSION_SWEEP_INTERVAL_SECS));
        loop {
            interval.tick().await;
            if let Err(e) = sweeper.delete_expired(chrono::Utc::now()).await {
                tracing::warn!(error = %e, "Failed to clean up expired sessions");
            }
        }
    });

    // 创建 HTTP 服务器
    let auth = AuthSettings {
        trusted_origins: TrustedOrigins::new(config.auth.all_trusted_origins()),
        session_ttl: chrono::Duration::seconds(config.auth.session_expire_secs as i64),
    };
    let state = AppState::new(
        user_repo,
        session_repo,
        Arc::new(Argon2PasswordHasher::new()),
        url_signer,
        speech_service,
        auth,
    );

    let server = HttpServer::new(config.server.addr(), state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
