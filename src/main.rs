// region:    --- Imports
use edition_auction_api::auth::AdminAuth;
use edition_auction_api::config::{AppConfig, StoreBackend};
use edition_auction_api::database::DatabaseManager;
use edition_auction_api::document_store::{
    DocumentStore, MemoryDocumentStore, PostgresDocumentStore,
};
use edition_auction_api::routes::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일이 있으면 로드
    let _ = dotenvy::dotenv();

    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // 설정 로드
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{:<12} --> 설정 로드 실패: {}", "Main", e);
            return Err(e.into());
        }
    };
    info!("{:<12} --> 설정 로드: {:?}", "Main", config);

    // 문서 저장소 선택
    let store: Arc<dyn DocumentStore> = match &config.store {
        StoreBackend::Memory => {
            warn!(
                "{:<12} --> 메모리 저장소 사용 (재시작하면 데이터가 사라집니다)",
                "Main"
            );
            Arc::new(MemoryDocumentStore::new())
        }
        StoreBackend::Postgres(database) => {
            let db_manager = Arc::new(DatabaseManager::connect(database).await?);

            // 데이터베이스 초기화
            if let Err(e) = db_manager.initialize_database().await {
                error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
                return Err(e.into());
            }
            info!("{:<12} --> 데이터베이스 초기화 성공", "Main");
            Arc::new(PostgresDocumentStore::new(db_manager))
        }
    };

    // 라우터 설정
    let state = AppState::new(
        store,
        AdminAuth::new(&config.admin_token),
        config.max_page_size,
    );
    let routes_all = create_router(state, config.body_limit_bytes);

    // 리스너 생성
    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}

/// Ctrl-C 대기
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("{:<12} --> 종료 신호 대기 실패: {}", "Main", e);
        std::future::pending::<()>().await;
    }
    info!("{:<12} --> 종료 신호 수신, 서버를 종료합니다", "Main");
}
// endregion: --- Main
