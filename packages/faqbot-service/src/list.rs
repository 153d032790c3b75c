use serde::Serialize;

use crate::FaqService;

#[derive(Debug, Serialize)]
pub struct ListResponse {
	pub entries: usize,
	pub embedding_version: String,
	pub items: Vec<ListItem>,
}

#[derive(Debug, Serialize)]
pub struct ListItem {
	pub index: usize,
	pub question: String,
	pub answer: String,
}

impl FaqService {
	pub fn list(&self) -> ListResponse {
		let table = self.store.snapshot();
		let items = table
			.entries
			.iter()
			.map(|entry| ListItem {
				index: entry.index,
				question: entry.question.clone(),
				answer: entry.answer.clone(),
			})
			.collect();

		ListResponse {
			entries: table.entries.len(),
			embedding_version: table.embedding_version.clone(),
			items,
		}
	}
}
