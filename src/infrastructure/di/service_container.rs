//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{CostService, NotificationService};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, MessageSink, RealFileSystem, StdoutSink};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Where notification channels deliver
    pub sink: Arc<dyn MessageSink>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(StdoutSink))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs, sink }
    }

    pub fn cost_service(&self) -> CostService {
        CostService::new(Arc::clone(&self.fs))
    }

    pub fn notification_service(&self) -> NotificationService {
        NotificationService::new(Arc::clone(&self.sink), self.settings.sender.clone())
    }
}
