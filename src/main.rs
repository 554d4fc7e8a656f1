//! Headless storefront runner.
//!
//! Connects to the realtime channel and logs notices until Ctrl-C. When a
//! vehicle slug is passed as the first argument, its configurator is loaded
//! and the base price breakdown is logged first.

use std::error::Error;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use showroom::adapters::{
    LocalEventBus, LogNoticeSink, LogShareSink, SocketIoTransport, StorefrontClient,
    StorefrontClientConfig,
};
use showroom::application::{ConfiguratorSession, NotificationProvider, SessionView};
use showroom::config::{AppConfig, LoggingConfig};
use showroom::domain::foundation::VehicleSlug;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging)?;
    config.validate()?;

    let storefront = Arc::new(StorefrontClient::new(
        StorefrontClientConfig::new(config.api.base_url()?).with_timeout(config.api.timeout()),
    )?);
    storefront
        .set_token(config.api.token().map(str::to_string))
        .await;

    let notices = Arc::new(LogNoticeSink);
    let bus = Arc::new(LocalEventBus::new(config.realtime.channel_capacity));
    let transport = Arc::new(SocketIoTransport::new(&config.realtime.url()?)?);

    let provider = NotificationProvider::new(
        transport,
        notices.clone(),
        bus.clone(),
        config.realtime.client_config(),
    );
    let handle = provider.mount()?;
    tracing::info!(url = %config.realtime.url, "Realtime client started");

    let mut signals = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match signals.recv().await {
                Ok(signal) => {
                    tracing::debug!(signal = signal.name(), payload = %signal.payload(), "Local signal")
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Local signal listener lagged")
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    if let Some(slug) = std::env::args().nth(1) {
        let slug = VehicleSlug::new(slug)?;
        let mut session = ConfiguratorSession::new(
            storefront,
            notices,
            Arc::new(LogShareSink),
            config.api.storefront_url()?,
        );
        if session.load(&slug).await == SessionView::Ready {
            let breakdown = session.breakdown()?;
            tracing::info!(
                slug = %slug,
                base_price = %breakdown.base_price,
                total_price = %breakdown.total_price,
                "Configurator ready"
            );
        }
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!(state = ?handle.state(), "Shutting down");
    provider.unmount();

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn Error>> {
    let registry = tracing_subscriber::registry().with(logging.env_filter()?);
    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
    Ok(())
}
