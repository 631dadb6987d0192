use std::sync::Arc;

use auth_service::config::Config;
use auth_service::domain::auth::errors::AuthError;
use auth_service::domain::auth::models::CreateUserCommand;
use auth_service::domain::auth::models::Username;
use auth_service::domain::auth::ports::AuthServicePort;
use auth_service::domain::auth::service::AuthService;
use auth_service::inbound::grpc::AuthGrpcService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::metrics::TracingMetrics;
use auth_service::outbound::stores::PostgresUserStore;
use auth_service::proto::auth_service_server::AuthServiceServer;
use sqlx::postgres::PgPoolOptions;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Accounts guaranteed to exist after startup. Re-seeding on restart is a
/// no-op.
const SEED_USERS: [(&str, &str); 2] = [("admin", "admin123"), ("user", "user123")];

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        grpc_port = config.server.grpc_port,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_store = Arc::new(PostgresUserStore::new(pg_pool));
    let metrics = Arc::new(TracingMetrics);
    let auth_service: Arc<dyn AuthServicePort> = Arc::new(AuthService::new(
        user_store,
        metrics,
        config.jwt.secret.as_bytes(),
    ));

    seed_users(auth_service.as_ref()).await?;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(Arc::clone(&auth_service));
    let http_server =
        tokio::spawn(async move { axum::serve(http_listener, http_application).await });

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_service = AuthGrpcService::new(Arc::clone(&auth_service));
    tracing::info!(
        address = %grpc_address,
        protocol = "grpc",
        "gRpc server listening"
    );

    let grpc_server = tokio::spawn(async move {
        Server::builder()
            .add_service(AuthServiceServer::new(grpc_service))
            .serve(grpc_address)
            .await
    });

    match tokio::try_join!(http_server, grpc_server) {
        Ok((_, _)) => tracing::info!("Servers exited successfully"),
        Err(e) => tracing::error!(error = %e, "Server error"),
    };

    Ok(())
}

async fn seed_users(auth_service: &dyn AuthServicePort) -> Result<(), anyhow::Error> {
    for (username, password) in SEED_USERS {
        let command = CreateUserCommand::new(
            Username::new(username.to_string())?,
            password.to_string(),
        );

        match auth_service.create_user(command).await {
            Ok(user) => tracing::info!(username = %user.username, "Seed user created"),
            Err(AuthError::UserAlreadyExists(_)) => {
                tracing::debug!(username, "Seed user already present")
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
