//! Diamond D Lube site server
//!

use diamond_d_site::api;
use diamond_d_site::config::SiteConfig;
use diamond_d_site::core::replies::ReplyQueue;
use diamond_d_site::infrastructure::catalog::SiteCatalog;
use diamond_d_site::service_provider;

use di::ServiceProvider;
use di_axum::RouterServiceProviderExtensions;
use log::info;
use tokio::runtime::{Builder, Runtime};

fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    let config = SiteConfig::from_env()?;
    let catalog = match &config.catalog_path {
        Some(path) => {
            info!("loading catalog from {}", path.display());
            SiteCatalog::from_path(path)?
        }
        None => SiteCatalog::embedded()?,
    };
    info!(
        "catalog: {} locations, {} reviews, {} chat rules",
        catalog.locations.len(),
        catalog.reviews.len(),
        catalog.chat.rules.len()
    );

    let runtime: Runtime = Builder::new_multi_thread().enable_all().build()?;
    let _guard = runtime.enter();

    // background task for delayed chatbot replies
    let (replies, reply_join_handle) = ReplyQueue::start();
    let provider = service_provider(config.clone(), catalog, replies)?;

    let web_task_handle = runtime.spawn(web_server_task(config, provider));

    runtime.block_on(async {
        web_task_handle.await??;
        reply_join_handle.await?;
        Ok::<(), anyhow::Error>(())
    })
}

async fn web_server_task(config: SiteConfig, provider: ServiceProvider) -> anyhow::Result<()> {
    let app = api::router(&config).with_provider(provider);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    info!("Shutting down...");

    Ok(())
}
