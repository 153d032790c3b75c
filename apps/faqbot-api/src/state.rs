use std::sync::Arc;

use faqbot_service::FaqService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<FaqService>,
}
impl AppState {
	pub async fn new(config: faqbot_config::Config) -> color_eyre::Result<Self> {
		let service = FaqService::load(config).await?;

		Ok(Self { service: Arc::new(service) })
	}

	pub fn with_service(service: FaqService) -> Self {
		Self { service: Arc::new(service) }
	}
}
