use crate::{
    config::Config,
    services::{BackendClient, PaymentViewService, PurchasesApi},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub payment_view_service: Arc<PaymentViewService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, anyhow::Error> {
        let backend = Arc::new(BackendClient::new(&config.backend)?);
        Ok(Self::with_api(config, backend))
    }

    /// Build state around any business API implementation
    pub fn with_api(config: Config, api: Arc<dyn PurchasesApi>) -> Self {
        let payment_view_service = Arc::new(PaymentViewService::new(
            api,
            &config.backend,
            &config.view,
        ));

        Self {
            payment_view_service,
            config: Arc::new(config),
        }
    }
}
