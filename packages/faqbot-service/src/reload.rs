use serde::Serialize;

use crate::{FaqService, Result};

#[derive(Debug, Serialize)]
pub struct ReloadReport {
	pub entries: usize,
	pub embedding_version: String,
}

impl FaqService {
	/// Re-reads the FAQ source, re-embeds every question, and publishes the
	/// fresh table in one swap. Any failure leaves the previous table
	/// serving; in-flight requests keep the snapshot they already hold.
	pub async fn reload(&self) -> Result<ReloadReport> {
		let table = crate::build_table(&self.cfg, &self.providers).await?;
		let report = ReloadReport {
			entries: table.entries.len(),
			embedding_version: table.embedding_version.clone(),
		};

		self.store.swap(table);

		tracing::info!(entries = report.entries, "Reloaded FAQ table.");

		Ok(report)
	}
}
