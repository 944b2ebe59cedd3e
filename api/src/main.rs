use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;

use rcp_api::{create_app, middleware::create_cors, telemetry, AppState};
use rcp_core::services::{
    AuditService, AuditServiceConfig, ClockRateLimiter, ClockService, ClockServiceConfig,
    InMemoryRateLimiter, QrTokenConfig, QrTokenService, RateLimitSweeper, RateLimiterConfig,
    SigningSecret,
};
use rcp_infra::{
    DatabasePool, MySqlAuditLogRepository, MySqlClockEventRepository, MySqlLocationRepository,
    MySqlQrConfigRepository, RedisClient, RedisClockRateLimiter,
};
use rcp_shared::{AppConfig, RateLimitBackend};

type MySqlAppState = AppState<
    MySqlLocationRepository,
    MySqlQrConfigRepository,
    MySqlClockEventRepository,
    MySqlAuditLogRepository,
>;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    telemetry::init(&config.logging);

    info!(environment = %config.environment, "Starting RCP API server");

    let database = DatabasePool::new(&config.database).await?;
    database.run_migrations().await?;
    let pool = database.get_pool().clone();

    let rate_limiter = build_rate_limiter(&config).await?;
    let sweeper = Arc::new(RateLimitSweeper::new(
        Arc::clone(&rate_limiter),
        config.rate_limit.sweep_interval_seconds,
    ));
    let sweep_task = sweeper.start_background_task();

    let secret = SigningSecret::new(config.rcp.qr_secret.as_bytes().to_vec())?;
    let token_service = Arc::new(QrTokenService::new(
        QrTokenConfig::new(secret).with_default_ttl(config.rcp.default_token_ttl_seconds),
    )?);

    let audit = Arc::new(AuditService::new(
        Arc::new(MySqlAuditLogRepository::new(pool.clone())),
        AuditServiceConfig::default(),
    ));

    let clock_service = Arc::new(ClockService::new(
        Arc::new(MySqlLocationRepository::new(pool.clone())),
        Arc::new(MySqlQrConfigRepository::new(pool.clone())),
        Arc::new(MySqlClockEventRepository::new(pool)),
        audit,
        rate_limiter,
        token_service,
        ClockServiceConfig::from(&config.rcp),
    ));

    let state: web::Data<MySqlAppState> = web::Data::new(
        AppState::new(clock_service).with_public_base_url(config.server.public_base_url.clone()),
    );

    let bind_address = config.server.bind_address();
    info!(%bind_address, "Server will bind");

    let environment = config.environment;
    let allowed_origins = config.server.allowed_origins.clone();
    let mut server = HttpServer::new(move || {
        create_app(state.clone())
            .wrap(create_cors(environment, &allowed_origins))
            .wrap(TracingLogger::default())
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    sweep_task.abort();
    database.close().await;
    info!("RCP API server stopped");
    Ok(())
}

async fn build_rate_limiter(config: &AppConfig) -> anyhow::Result<Arc<dyn ClockRateLimiter>> {
    let limits = RateLimiterConfig::from(&config.rate_limit);
    let limiter: Arc<dyn ClockRateLimiter> = match config.rate_limit.backend {
        RateLimitBackend::Memory => {
            info!(
                window_seconds = limits.window_seconds,
                max_attempts = limits.max_attempts,
                "Using in-memory rate limiter"
            );
            Arc::new(InMemoryRateLimiter::new(limits))
        }
        RateLimitBackend::Redis => {
            let client = RedisClient::new(config.cache.clone()).await?;
            info!("Using Redis rate limiter");
            Arc::new(RedisClockRateLimiter::new(client, limits))
        }
    };
    Ok(limiter)
}
