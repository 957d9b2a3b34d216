//! Diamond D Lube site server - Library exports for testing

pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;

use crate::config::SiteConfig;
use crate::core::replies::ReplyQueue;
use crate::core::services::{MyChatService, MyLocationService, MyPageService};
use crate::infrastructure::catalog::SiteCatalog;
use crate::infrastructure::repositories::InMemorySessionRepository;
use anyhow::anyhow;
use di::{Injectable, Ref, ServiceCollection, ServiceProvider, singleton_as_self};

/// Registers every service the routes inject.
pub fn service_provider(
    config: SiteConfig,
    catalog: SiteCatalog,
    replies: ReplyQueue,
) -> anyhow::Result<ServiceProvider> {
    let config = Ref::new(config);
    let catalog = Ref::new(catalog);
    let replies = Ref::new(replies);

    ServiceCollection::new()
        .add(singleton_as_self::<SiteConfig>().from(move |_| config.clone()))
        .add(singleton_as_self::<SiteCatalog>().from(move |_| catalog.clone()))
        .add(singleton_as_self::<ReplyQueue>().from(move |_| replies.clone()))
        .add(InMemorySessionRepository::singleton())
        .add(MyLocationService::scoped())
        .add(MyChatService::scoped())
        .add(MyPageService::scoped())
        .build_provider()
        .map_err(|e| anyhow!("invalid service registrations: {e:?}"))
}
