mod error;
mod loader;

pub use error::{Error, Result};
pub use loader::load_entries;

use std::sync::{Arc, RwLock};

/// One stored question/answer pair. `index` is the original table order and
/// breaks retrieval-score ties.
#[derive(Clone, Debug)]
pub struct FaqEntry {
	pub index: usize,
	pub question: String,
	pub answer: String,
	pub embedding: Option<Vec<f32>>,
}
impl FaqEntry {
	pub fn document(&self) -> String {
		format!("Q: {}\nA: {}", self.question, self.answer)
	}
}

/// An immutable published snapshot of the FAQ table. Reload never mutates a
/// snapshot in place; it builds a replacement and swaps the handle.
#[derive(Clone, Debug, Default)]
pub struct FaqTable {
	pub entries: Vec<FaqEntry>,
	pub embedding_version: String,
}

/// Shared read-mostly handle. Readers clone the `Arc` once and keep working
/// on that snapshot; concurrent reloads can never expose a half-updated
/// table.
pub struct FaqStore {
	table: RwLock<Arc<FaqTable>>,
}
impl FaqStore {
	pub fn new(table: FaqTable) -> Self {
		Self { table: RwLock::new(Arc::new(table)) }
	}

	pub fn snapshot(&self) -> Arc<FaqTable> {
		self.table.read().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn swap(&self, table: FaqTable) {
		*self.table.write().unwrap_or_else(|err| err.into_inner()) = Arc::new(table);
	}
}
