/// Score ranking and result formatting
///
/// Pairs each output score with the label at the same index, sorts by
/// score descending, and formats the top entries for display.

/// How many ranked results the UI shows
pub const TOP_K: usize = 3;

/// Rank scores against labels and format the top `k` lines
///
/// The sort is stable and ties keep their original index order, so equal
/// scores always rank the lower-indexed label first and the output is
/// deterministic.
///
/// If the label list is empty or its length differs from the score vector,
/// index-wise pairing would be meaningless; a single diagnostic line is
/// returned instead of a partial ranking.
pub fn top_k(scores: &[f32], labels: &[String], k: usize) -> Vec<String> {
    if labels.is_empty() || labels.len() != scores.len() {
        return vec![format!(
            "No result: {} labels for {} scores",
            labels.len(),
            scores.len()
        )];
    }

    let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
        .iter()
        .take(k)
        .map(|&(index, score)| format_line(&labels[index], score))
        .collect()
}

/// Format one result line as "label: NN%"
///
/// The percentage is the integer cast of score * 100, truncated toward
/// zero: 0.789 displays as 78%, not 79%.
pub fn format_line(label: &str, score: f32) -> String {
    format!("{}: {}%", label, (score * 100.0) as i32)
}
