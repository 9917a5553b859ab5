use url::Url;

use crate::CandidateUrl;

/// Select hrefs with `predicate` and complete them against `base`.
///
/// Input order is kept and duplicates pass through untouched. The predicate
/// sees the raw href exactly as it appeared on the page. Hrefs that cannot be
/// resolved to a URL (empty, fragment-only, `javascript:`) are dropped.
pub fn filter_links<I, S, P>(hrefs: I, base: &Url, predicate: P) -> Vec<CandidateUrl>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: Fn(&str) -> bool,
{
    hrefs
        .into_iter()
        .filter_map(|href| {
            let href = href.as_ref();
            if predicate(href) {
                resolve_href(href, base)
            } else {
                None
            }
        })
        .map(CandidateUrl::new)
        .collect()
}

fn resolve_href(reference: &str, base: &Url) -> Option<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with("javascript:") {
        return None;
    }
    base.join(trimmed).ok()
}
