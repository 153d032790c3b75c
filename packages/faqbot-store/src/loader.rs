use std::{fs::File, path::Path};

use csv::ReaderBuilder;

use crate::{Error, FaqEntry, Result};

/// Reads the FAQ table from a CSV file. Rows with a blank question or answer
/// are skipped; extra columns are ignored. Embeddings are not attached here.
pub fn load_entries(path: &Path, cfg: &faqbot_config::Faq) -> Result<Vec<FaqEntry>> {
	let file =
		File::open(path).map_err(|err| Error::Read { path: path.to_path_buf(), source: err })?;
	let mut reader = ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(file);
	let headers = reader.headers()?.clone();
	let question_idx = column_index(&headers, &cfg.question_column)?;
	let answer_idx = column_index(&headers, &cfg.answer_column)?;
	let mut entries = Vec::new();
	let mut skipped = 0_usize;

	for record in reader.records() {
		let record = record?;
		let question = record.get(question_idx).unwrap_or("").trim();
		let answer = record.get(answer_idx).unwrap_or("").trim();

		if question.is_empty() || answer.is_empty() {
			skipped += 1;

			continue;
		}

		entries.push(FaqEntry {
			index: entries.len(),
			question: question.to_string(),
			answer: answer.to_string(),
			embedding: None,
		});
	}

	if skipped > 0 {
		tracing::warn!(skipped, "Skipped FAQ rows with a blank question or answer.");
	}
	if entries.is_empty() {
		return Err(Error::Empty);
	}

	tracing::info!(entries = entries.len(), path = %path.display(), "Loaded FAQ table.");

	Ok(entries)
}

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize> {
	headers
		.iter()
		.position(|header| header == column)
		.ok_or_else(|| Error::MissingColumn { column: column.to_string() })
}
