use std::path::{Path, PathBuf};

use faqbot_config::Faq;
use faqbot_store::{Error, load_entries};

fn fixture(name: &str) -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn faq_config() -> Faq {
	Faq {
		source: fixture("faqs.csv"),
		question_column: "question".to_string(),
		answer_column: "answer".to_string(),
	}
}

#[test]
fn loads_entries_in_table_order() {
	let entries = load_entries(&fixture("faqs.csv"), &faq_config()).expect("load failed");

	assert_eq!(entries.len(), 3);
	assert_eq!(entries[0].index, 0);
	assert_eq!(entries[0].question, "What are your hours?");
	assert_eq!(entries[0].answer, "9-5 Mon-Fri");
	assert_eq!(entries[2].index, 2);
	assert!(entries.iter().all(|entry| entry.embedding.is_none()));
}

#[test]
fn ignores_extra_columns() {
	let entries = load_entries(&fixture("faqs.csv"), &faq_config()).expect("load failed");

	assert!(entries.iter().all(|entry| !entry.answer.contains("general")));
}

#[test]
fn skips_rows_with_blank_fields() {
	let entries =
		load_entries(&fixture("faqs_blank_rows.csv"), &faq_config()).expect("load failed");

	assert_eq!(entries.len(), 2);
	assert_eq!(entries[0].question, "What are your hours?");
	assert_eq!(entries[1].question, "Refund policy?");
	// Indexes are reassigned after skipping so tie-breaking stays dense.
	assert_eq!(entries[1].index, 1);
}

#[test]
fn missing_column_is_an_error() {
	match load_entries(&fixture("faqs_missing_column.csv"), &faq_config()) {
		Err(Error::MissingColumn { column }) => assert_eq!(column, "answer"),
		other => panic!("Expected a missing-column error, got {other:?}."),
	}
}

#[test]
fn all_blank_rows_is_an_error() {
	assert!(matches!(
		load_entries(&fixture("faqs_empty.csv"), &faq_config()),
		Err(Error::Empty)
	));
}

#[test]
fn unreadable_source_reports_path() {
	let path = fixture("does_not_exist.csv");

	match load_entries(&path, &faq_config()) {
		Err(Error::Read { path: reported, .. }) => assert_eq!(reported, path),
		other => panic!("Expected a read error, got {other:?}."),
	}
}

#[test]
fn custom_column_names_are_honored() {
	let cfg = Faq {
		source: fixture("faqs_missing_column.csv"),
		question_column: "question".to_string(),
		answer_column: "reply".to_string(),
	};
	let entries = load_entries(&fixture("faqs_missing_column.csv"), &cfg).expect("load failed");

	assert_eq!(entries.len(), 1);
	assert_eq!(entries[0].answer, "9-5 Mon-Fri");
}
