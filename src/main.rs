mod handlers;
mod middleware;
mod models;
mod services;
mod utils;

use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::env;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    handlers::{auth, candidates, dashboard, files, interviews, notes, technologies},
    middleware::auth::auth_middleware,
    utils::database::create_pool,
};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_secret: String,
    pub upload_dir: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "interview_tracker_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "./storage/resumes".to_string());

    if let Err(e) = std::fs::create_dir_all(&upload_dir) {
        tracing::warn!("Failed to create upload directory {}: {}", upload_dir, e);
    }

    let db = create_pool(&database_url).await?;

    sqlx::migrate!("./migrations").run(&db).await?;

    let state = AppState {
        db,
        jwt_secret,
        upload_dir,
    };

    let cors_origin =
        env::var("CORS_ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

    let cors = if cors_origin == "*" {
        CorsLayer::new()
            .allow_origin(HeaderValue::from_static("*"))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
            ])
    } else {
        CorsLayer::new()
            .allow_origin(cors_origin.parse::<HeaderValue>()?)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
            ])
    };

    let protected_routes = Router::new()
        .route("/candidate/readAll", get(candidates::read_all))
        .route("/candidate/read/:id", get(candidates::read))
        .route("/candidate/create", post(candidates::create))
        .route("/candidate/update/:id", put(candidates::update))
        .route("/candidate/delete/:id", delete(candidates::delete))
        .route("/candidate/:id/resume", post(candidates::upload_resume))
        .route("/technology/readAll", get(technologies::read_all))
        .route("/technology/read/:id", get(technologies::read))
        .route("/technology/create", post(technologies::create))
        .route("/technology/update/:id", put(technologies::update))
        .route("/technology/delete/:id", delete(technologies::delete))
        .route("/interview", get(interviews::list))
        .route("/interview", post(interviews::create))
        .route("/interview/:id", get(interviews::list_for_candidate))
        .route("/interview/:id", put(interviews::update))
        .route("/interview/:id", delete(interviews::delete))
        .route("/interview/:id/status", put(interviews::update_status))
        .route("/interview/:id/reschedule", post(interviews::reschedule))
        .route("/note/:id", get(notes::list_for_interview))
        .route("/note", post(notes::create))
        .route("/note/:id", delete(notes::delete))
        .route("/dashboard/total", get(dashboard::totals))
        .route("/files/:filename", get(files::serve_file))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .merge(protected_routes)
        .layer(cors)
        .with_state(state.clone());

    let port = env::var("PORT")
        .unwrap_or_else(|_| "4000".to_string())
        .parse::<u16>()
        .unwrap_or(4000);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
