use rapidfuzz::distance::indel;

/// Best Indel similarity (0-100) between the shorter input and any window of
/// the longer input of the same length, including the shorter windows that
/// hang off either end. A literal occurrence scores 100.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (needle, haystack) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if needle.is_empty() {
        return if haystack.is_empty() { 100.0 } else { 0.0 };
    }
    if haystack.windows(needle.len()).any(|w| w == needle.as_slice()) {
        return 100.0;
    }

    let n = needle.len();
    let h = haystack.len();
    let score = |window: &[char]| {
        indel::normalized_similarity(needle.iter().copied(), window.iter().copied()) * 100.0
    };

    let mut best = 0.0_f64;
    // partial windows anchored at either end
    for len in 1..n {
        best = best.max(score(&haystack[..len]));
        best = best.max(score(&haystack[h - len..]));
    }
    for window in haystack.windows(n) {
        best = best.max(score(window));
    }
    best
}
