use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

const RELEVANCE_WEIGHT: f32 = 0.3;
const COMPLETENESS_WEIGHT: f32 = 0.2;
const CLARITY_WEIGHT: f32 = 0.2;
const ACCURACY_WEIGHT: f32 = 0.3;

static SCORE_LINE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^(relevance|completeness|clarity|accuracy|overall)\s*:\s*([0-9]+(?:\.[0-9]+)?)")
		.expect("Score line pattern must compile.")
});

const STOPWORDS: &[&str] = &[
	"the", "a", "an", "and", "or", "but", "is", "are", "was", "were", "be", "been", "being", "in",
	"on", "at", "to", "for", "with", "by", "about", "against", "between", "into", "through",
	"this", "that", "these", "those", "of", "from", "you", "your", "our", "can", "how", "what",
	"when", "where", "why", "who",
];

/// Per-criterion quality scores on a 0-5 scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Scores {
	pub relevance: f32,
	pub completeness: f32,
	pub clarity: f32,
	pub accuracy: f32,
	pub overall: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMethod {
	Heuristic,
	Model,
}

#[derive(Clone, Debug, Serialize)]
pub struct Evaluation {
	pub scores: Scores,
	pub reasons: Vec<String>,
	pub method: EvaluationMethod,
}

/// Rule-based quality scoring. Relevance and accuracy come from keyword
/// overlap between the question, the answer, and the retrieved context;
/// completeness and clarity from length and sentence shape.
pub fn evaluate_heuristic(query: &str, response: &str, context: &str) -> Evaluation {
	let query_terms: HashSet<String> = extract_keywords(query).into_iter().collect();
	let response_terms: HashSet<String> = extract_keywords(response).into_iter().collect();
	let context_terms: HashSet<String> = extract_keywords(context).into_iter().collect();

	let mut reasons = Vec::new();

	let common = query_terms.intersection(&response_terms).count();
	let relevance = scale((common as f32) / (query_terms.len().max(1) as f32));

	if relevance < 2.5 {
		reasons.push("Relevance: response shares few key terms with the question.".to_string());
	} else {
		reasons.push("Relevance: response shares key terms with the question.".to_string());
	}

	let word_count = response.split_whitespace().count();
	let completeness = if word_count < 10 {
		reasons.push("Completeness: response is too short.".to_string());

		1.0
	} else if word_count < 30 {
		reasons.push("Completeness: response is of medium length.".to_string());

		3.0
	} else {
		reasons.push("Completeness: response has good length.".to_string());

		5.0
	};

	let sentences = response.split('.').filter(|s| !s.trim().is_empty()).count();
	let avg_words_per_sentence = (word_count as f32) / (sentences.max(1) as f32);
	let clarity = if avg_words_per_sentence > 25.0 {
		reasons.push("Clarity: sentences are too long.".to_string());

		2.0
	} else if avg_words_per_sentence > 15.0 {
		reasons.push("Clarity: sentences are of moderate length.".to_string());

		3.5
	} else {
		reasons.push("Clarity: sentences are concise.".to_string());

		5.0
	};

	let response_unique: Vec<&String> = response_terms.difference(&query_terms).collect();
	let grounded =
		response_unique.iter().filter(|term| context_terms.contains(term.as_str())).count();
	let accuracy = scale((grounded as f32) / (response_unique.len().max(1) as f32));

	if accuracy < 2.5 {
		reasons.push("Accuracy: response contains information not in the context.".to_string());
	} else {
		reasons.push("Accuracy: response information is present in the context.".to_string());
	}

	let scores = with_overall(relevance, completeness, clarity, accuracy, None);

	Evaluation { scores, reasons, method: EvaluationMethod::Heuristic }
}

/// Prompt for the model-based evaluator; the expected reply format matches
/// what [`parse_model_scores`] accepts.
pub fn build_evaluation_prompt(query: &str, response: &str, context: &str) -> String {
	format!(
		"You are an expert evaluator of chatbot responses.\n\n\
		USER QUERY: {query}\n\n\
		RETRIEVED CONTEXT: {context}\n\n\
		CHATBOT RESPONSE: {response}\n\n\
		Score the response on a scale of 1-5 (5 is best) for relevance, \
		completeness, clarity, and accuracy.\n\
		Reply with exactly one line per criterion:\n\
		Relevance: [score]\n\
		Completeness: [score]\n\
		Clarity: [score]\n\
		Accuracy: [score]\n\
		Overall: [average score]"
	)
}

/// Parses the evaluator model's reply. Returns `None` unless all four
/// criterion scores are present; a missing overall line is recomputed from
/// the criteria.
pub fn parse_model_scores(text: &str) -> Option<Scores> {
	let mut relevance = None;
	let mut completeness = None;
	let mut clarity = None;
	let mut accuracy = None;
	let mut overall = None;

	for line in text.lines() {
		let Some(captures) = SCORE_LINE.captures(line.trim()) else {
			continue;
		};
		let score: f32 = captures[2].parse().ok()?;
		let score = score.clamp(0.0, 5.0);

		match captures[1].to_ascii_lowercase().as_str() {
			"relevance" => relevance = Some(score),
			"completeness" => completeness = Some(score),
			"clarity" => clarity = Some(score),
			"accuracy" => accuracy = Some(score),
			"overall" => overall = Some(score),
			_ => {},
		}
	}

	Some(with_overall(relevance?, completeness?, clarity?, accuracy?, overall))
}

fn with_overall(
	relevance: f32,
	completeness: f32,
	clarity: f32,
	accuracy: f32,
	overall: Option<f32>,
) -> Scores {
	let overall = overall.unwrap_or_else(|| {
		let weighted = relevance * RELEVANCE_WEIGHT
			+ completeness * COMPLETENESS_WEIGHT
			+ clarity * CLARITY_WEIGHT
			+ accuracy * ACCURACY_WEIGHT;

		(weighted * 100.0).round() / 100.0
	});

	Scores { relevance, completeness, clarity, accuracy, overall }
}

fn scale(ratio: f32) -> f32 {
	(ratio * 5.0).min(5.0)
}

fn extract_keywords(text: &str) -> Vec<String> {
	text.split(|c: char| !c.is_alphanumeric())
		.map(|word| word.to_lowercase())
		.filter(|word| word.len() > 2 && !STOPWORDS.contains(&word.as_str()))
		.collect()
}
