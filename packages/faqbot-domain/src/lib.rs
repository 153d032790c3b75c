pub mod evaluator;
pub mod prompt;
pub mod similarity;
