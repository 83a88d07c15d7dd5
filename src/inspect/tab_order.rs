use crate::inspect::collector::Candidate;

/// Order candidates the way sequential focus navigation visits them.
///
/// Positive `tabindex` first, ascending, ties broken by document order; then
/// every other element (unset, empty, or 0) in document order.
pub fn resolve_tab_order(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let (mut positive, mut normal): (Vec<_>, Vec<_>) =
        candidates.into_iter().partition(|c| c.order_key() > 0);

    positive.sort_by(|a, b| {
        a.order_key()
            .cmp(&b.order_key())
            .then(a.encounter.cmp(&b.encounter))
    });
    normal.sort_by_key(|c| c.encounter);

    positive.extend(normal);
    positive
}

