/// Cosine similarity between two vectors. Returns `None` when the lengths
/// differ or either vector has zero magnitude, so callers can skip the pair
/// instead of ranking on a garbage score.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
	if a.len() != b.len() || a.is_empty() {
		return None;
	}

	let mut dot = 0.0_f64;
	let mut norm_a = 0.0_f64;
	let mut norm_b = 0.0_f64;

	for (x, y) in a.iter().zip(b) {
		dot += f64::from(*x) * f64::from(*y);
		norm_a += f64::from(*x) * f64::from(*x);
		norm_b += f64::from(*y) * f64::from(*y);
	}

	if norm_a == 0.0 || norm_b == 0.0 {
		return None;
	}

	// Clamp against floating-point drift; similarity is defined on [-1, 1].
	Some((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0) as f32)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identical_vectors_score_one() {
		let v = [0.3_f32, 0.4, 0.5];

		assert!((cosine_similarity(&v, &v).unwrap() - 1.0).abs() < 1e-6);
	}

	#[test]
	fn orthogonal_vectors_score_zero() {
		assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap().abs() < 1e-6);
	}

	#[test]
	fn opposite_vectors_score_negative_one() {
		assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap() + 1.0).abs() < 1e-6);
	}

	#[test]
	fn mismatched_lengths_are_rejected() {
		assert!(cosine_similarity(&[1.0, 2.0], &[1.0]).is_none());
	}

	#[test]
	fn zero_vectors_are_rejected() {
		assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).is_none());
	}
}
