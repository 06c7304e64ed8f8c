use error_stack::ResultExt;
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use kernel::KernelError;

use crate::config::AppConfig;
use crate::error::StackTrace;
use crate::handler::AppModule;

mod config;
mod controller;
mod error;
mod handler;
mod identity;
mod route;

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let config = AppConfig::from_env()?;

    let appender = tracing_appender::rolling::daily(config.log_dir(), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(config.log_filter()))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    let app = AppModule::new(&config).await?;
    let router = route::app(app.clone());

    let tcp = TcpListener::bind(*config.bind())
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Failed to listen on {}", config.bind()))?;
    tracing::info!(bind = %config.bind(), "listening");

    axum::serve(tcp, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    app.database().close().await;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => tracing::error!("unable to listen for shutdown signal: {e}"),
    }
}
