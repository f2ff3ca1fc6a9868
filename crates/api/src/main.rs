use std::net::SocketAddr;
use std::sync::Arc;

use kinoplex_api::auth::password::hash_password;
use kinoplex_api::config::ServerConfig;
use kinoplex_api::router::build_app_router;
use kinoplex_api::state::AppState;
use kinoplex_core::roles::ROLE_ADMIN;
use kinoplex_db::models::user::CreateUser;
use kinoplex_db::repositories::{RoleRepo, UserRepo};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kinoplex_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = kinoplex_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    kinoplex_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    kinoplex_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    bootstrap_admin(&pool).await;

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Create the first admin account when the users table is empty.
///
/// Role seed data comes from migrations, but argon2 hashes cannot be
/// produced in SQL, so the initial credentials come from the environment:
/// `ADMIN_USERNAME` (default `admin`), `ADMIN_EMAIL` (default
/// `admin@localhost`), and `ADMIN_PASSWORD` (required on first start).
async fn bootstrap_admin(pool: &kinoplex_db::DbPool) {
    let user_count = UserRepo::count(pool).await.expect("Failed to count users");
    if user_count > 0 {
        return;
    }

    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@localhost".into());
    let password = std::env::var("ADMIN_PASSWORD")
        .expect("ADMIN_PASSWORD must be set to bootstrap the first admin user");

    let role = RoleRepo::find_by_name(pool, ROLE_ADMIN)
        .await
        .expect("Failed to load admin role")
        .expect("Admin role missing from seed data");

    let password_hash = hash_password(&password).expect("Failed to hash admin password");

    UserRepo::create(
        pool,
        &CreateUser {
            username: username.clone(),
            email,
            password_hash,
            role_id: role.id,
        },
    )
    .await
    .expect("Failed to create bootstrap admin user");

    tracing::info!(%username, "Bootstrap admin user created");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server shuts
/// down cleanly whether stopped interactively or by a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
