use tracing::{error, info};

use crate::actor_framework::{StoreActor, StoreClient, StoreError};
use crate::app_system::RegistryConfig;
use crate::domain::Student;
use crate::error::SystemError;
use crate::registration::RegistrationService;
use crate::transport::StudentRoutes;

/// The application system: starts the store actor and wires the service
/// and routes on top of it.
pub struct RegistrySystem {
    pub service: RegistrationService,
    pub routes: StudentRoutes,
    store: StoreClient<Student>,
    handle: tokio::task::JoinHandle<()>,
}

impl RegistrySystem {
    /// Must be called from within a tokio runtime.
    pub fn new(config: &RegistryConfig) -> Self {
        info!(store_buffer = config.store_buffer, "Starting registry system");

        let (store_actor, store_client) = StoreActor::<Student>::new(config.store_buffer);
        let handle = tokio::spawn(store_actor.run());

        let service = RegistrationService::new(store_client.clone());
        let routes = StudentRoutes::new(service.clone(), config.location_prefix.clone());

        Self {
            service,
            routes,
            store: store_client,
            handle,
        }
    }

    /// Number of students currently held by the store.
    pub async fn store_len(&self) -> Result<usize, StoreError> {
        self.store.len().await
    }

    /// Drops every handle to the store and waits for its actor to finish.
    ///
    /// Clones of the service or routes taken from this system must be dropped
    /// first, or the store actor keeps running.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        match self.store.len().await {
            Ok(records) => info!(records, "Shutting down registry system..."),
            Err(e) => error!(error = %e, "Shutting down registry system, store already closed"),
        }

        drop(self.routes);
        drop(self.service);
        drop(self.store);

        if let Err(e) = self.handle.await {
            error!("Store actor task failed: {:?}", e);
            return Err(e.into());
        }

        info!("Registry system shutdown complete.");
        Ok(())
    }
}
