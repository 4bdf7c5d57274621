//! LearnHub 백엔드 메인 애플리케이션
//!
//! MongoDB, Redis, Bunny.net 클라이언트를 준비해 ServiceLocator에 등록하고,
//! 컬렉션 인덱스를 만든 뒤 Actix-web 서버를 띄웁니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use learnhub_backend::caching::redis::RedisClient;
use learnhub_backend::config::{Environment, RateLimitConfig, ServerConfig};
use learnhub_backend::core::errors::AppError;
use learnhub_backend::core::registry::ServiceLocator;
use learnhub_backend::db::Database;
use learnhub_backend::repositories::{activity, commerce, content, courses, jobs, media, quizzes, social, users};
use learnhub_backend::routes::configure_all_routes;
use learnhub_backend::storage::BunnyClient;

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 LearnHub 백엔드 시작중... (환경: {:?})", Environment::current());

    let (database, redis_client) = initialize_data_stores().await?;

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);
    ServiceLocator::set(Arc::new(BunnyClient::from_env()));

    ServiceLocator::initialize_all()
        .await
        .map_err(|e| startup_error("서비스 초기화 실패", e))?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    ensure_indexes().await;

    start_http_server().await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어 적용 순서(바깥부터): Rate Limiting → CORS → 로깅 → 경로 정규화
///
/// # Errors
///
/// * `std::io::Error` - Rate Limiting 설정 오류, 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server() -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API Docs: http://{}/api/docs/openapi.json", bind_address);

    let rate_limit_config = RateLimitConfig::load();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let allowed_origins = ServerConfig::allowed_origins();

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&allowed_origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(&bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => println!(".env.prod 파일 로드 됨"),
            Err(e) => eprintln!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => println!(".env.dev 파일 로드 됨"),
            Err(e) => eprintln!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// ```bash
/// RUST_LOG=learnhub_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Redis 연결을 초기화합니다
///
/// # Errors
///
/// 어느 한쪽이라도 연결에 실패하면 `std::io::Error`로 변환해 반환하고 프로세스가 종료됩니다.
async fn initialize_data_stores() -> io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new()
        .await
        .map_err(|e| startup_error("데이터베이스 연결 실패", e))?;
    info!("✅ MongoDB 연결 성공");

    let redis_client = RedisClient::new()
        .await
        .map_err(|e| startup_error("Redis 연결 실패", e))?;
    info!("✅ Redis 연결 성공");

    Ok((Arc::new(database), Arc::new(redis_client)))
}

/// 컬렉션 인덱스를 생성합니다. 실패해도 서버는 계속 뜹니다.
async fn ensure_indexes() {
    let results: Vec<(&str, Result<(), AppError>)> = vec![
        ("users", users::user_repo::UserRepository::instance().create_indexes().await),
        ("courses", courses::course_repo::CourseRepository::instance().create_indexes().await),
        ("reviews", courses::review_repo::ReviewRepository::instance().create_indexes().await),
        ("quizzes", quizzes::quiz_repo::QuizRepository::instance().create_indexes().await),
        ("quiz_attempts", quizzes::quiz_attempt_repo::QuizAttemptRepository::instance().create_indexes().await),
        ("jobs", jobs::job_repo::JobRepository::instance().create_indexes().await),
        ("applications", jobs::application_repo::ApplicationRepository::instance().create_indexes().await),
        ("carts", commerce::cart_repo::CartRepository::instance().create_indexes().await),
        ("wishlists", commerce::wishlist_repo::WishlistRepository::instance().create_indexes().await),
        ("addresses", commerce::address_repo::AddressRepository::instance().create_indexes().await),
        ("posts", social::post_repo::PostRepository::instance().create_indexes().await),
        ("comments", social::comment_repo::CommentRepository::instance().create_indexes().await),
        ("hashtags", social::hashtag_repo::HashtagRepository::instance().create_indexes().await),
        ("messages", social::message_repo::MessageRepository::instance().create_indexes().await),
        ("publications", content::publication_repo::PublicationRepository::instance().create_indexes().await),
        ("schedules", content::schedule_repo::ScheduleRepository::instance().create_indexes().await),
        ("activity_logs", activity::activity_repo::ActivityRepository::instance().create_indexes().await),
        ("search_histories", activity::search_history_repo::SearchHistoryRepository::instance().create_indexes().await),
        ("videos", media::video_repo::VideoRepository::instance().create_indexes().await),
    ];

    for (collection, result) in results {
        if let Err(e) = result {
            warn!("⚠️ {} 인덱스 생성 실패: {}", collection, e);
        }
    }

    info!("🗂️ 컬렉션 인덱스 확인 완료");
}

/// `CORS_ALLOWED_ORIGINS`에 나열된 Origin만 허용하는 CORS 설정
fn configure_cors(allowed_origins: &[String]) -> Cors {
    let cors = allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    error!("❌ {}: {}", context, err);
    io::Error::other(format!("{}: {}", context, err))
}
