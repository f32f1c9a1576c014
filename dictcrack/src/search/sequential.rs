use tracing::debug;

use crate::digest::Digester;
use crate::errors::{CrackError, CrackResult};
use crate::results::SearchOutcome;

/// Linear scan in ascending index order.
///
/// Returns the candidate at the smallest index whose digest equals `target`,
/// which makes this the deterministic reference for every other scanner.
pub fn sequential_scan<D>(target: &str, corpus: &[String], digest: &D) -> SearchOutcome
where
    D: Digester + ?Sized,
{
    corpus
        .iter()
        .find(|candidate| digest.digest(candidate) == target)
        .cloned()
        .into()
}

/// [`sequential_scan`] with the empty-corpus precondition checked
pub fn find_sequential<D>(target: &str, corpus: &[String], digest: &D) -> CrackResult<SearchOutcome>
where
    D: Digester + ?Sized,
{
    if corpus.is_empty() {
        return Err(CrackError::EmptyCorpus);
    }

    let outcome = sequential_scan(target, corpus, digest);
    debug!(
        "Sequential scan over {} candidates: {}",
        corpus.len(),
        outcome
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::DigestAlgorithm;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_finds_planted_word() {
        let corpus = words(&["apple", "banana", "cherry"]);
        let algorithm = DigestAlgorithm::Sha256;
        let target = algorithm.digest("banana");

        assert_eq!(
            sequential_scan(&target, &corpus, &algorithm),
            SearchOutcome::Found("banana".to_string())
        );
    }

    #[test]
    fn test_returns_smallest_index() {
        // Every candidate of length 1 collides under this digest.
        let by_len = |s: &str| s.len().to_string();
        let corpus = words(&["aa", "x", "y", "bb", "z"]);

        assert_eq!(
            sequential_scan("1", &corpus, &by_len),
            SearchOutcome::Found("x".to_string())
        );
    }

    #[test]
    fn test_no_match() {
        let corpus = words(&["apple", "banana"]);
        let algorithm = DigestAlgorithm::Md5;
        let target = algorithm.digest("durian");

        assert_eq!(
            sequential_scan(&target, &corpus, &algorithm),
            SearchOutcome::NotFound
        );
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let result = find_sequential("abc", &[], &DigestAlgorithm::Sha1);
        assert!(matches!(result, Err(CrackError::EmptyCorpus)));
    }
}
