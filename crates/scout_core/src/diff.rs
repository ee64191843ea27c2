use crate::{ProbeResult, SeenUrls, ValidUrl};

/// Split of a run's probe results against the previously seen set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiffOutcome {
    /// Every URL that answered 200 this run, in probe order.
    pub all_valid: Vec<ValidUrl>,
    /// The subset of `all_valid` absent from the seen set, same order.
    pub new_valid: Vec<ValidUrl>,
}

/// Filters results to the valid subset and subtracts the seen set.
///
/// Probe results arrive in window order (ascending value), and both output
/// lists preserve it, so digest content and highest-value selection are
/// deterministic for identical inputs.
pub fn diff(results: &[ProbeResult], seen: &SeenUrls) -> DiffOutcome {
    let all_valid: Vec<ValidUrl> = results
        .iter()
        .filter(|result| result.succeeded())
        .map(|result| ValidUrl {
            url: result.url.clone(),
            value: result.value,
        })
        .collect();

    let new_valid = all_valid
        .iter()
        .filter(|valid| !seen.contains(&valid.url))
        .cloned()
        .collect();

    DiffOutcome {
        all_valid,
        new_valid,
    }
}
