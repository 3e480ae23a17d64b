//! Business logic services

pub mod catalog;
pub mod loans;
pub mod sessions;
pub mod stats;

use crate::{config::CatalogConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub stats: stats::StatsService,
    pub sessions: sessions::SessionsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, catalog_config: CatalogConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone(), catalog_config.clone()),
            loans: loans::LoansService::new(repository.clone(), catalog_config),
            stats: stats::StatsService::new(repository),
            sessions: sessions::SessionsService::new(),
        }
    }
}
