use crate::response::AcbItem;

/// Greedy packing (§4.H step 3/"greedy packing rule"): scan `candidates` in
/// the order given, include an item iff `used + token_est ≤ local_budget`,
/// and keep scanning past a skipped item rather than stopping at the first
/// one that doesn't fit.
pub fn pack_greedy(
    local_budget: i32,
    candidates: Vec<(Option<String>, String, i32)>,
) -> (Vec<AcbItem>, i32, usize) {
    let mut items = Vec::new();
    let mut used = 0;
    let mut omitted = 0;
    for (source_id, text, token_est) in candidates {
        if used + token_est <= local_budget {
            used += token_est;
            items.push(AcbItem {
                source_id,
                text,
                token_est,
            });
        } else {
            omitted += 1;
        }
    }
    (items, used, omitted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_until_budget_exhausted() {
        let candidates = vec![
            (None, "a".into(), 40),
            (None, "b".into(), 40),
            (None, "c".into(), 40),
        ];
        let (items, used, omitted) = pack_greedy(100, candidates);
        assert_eq!(items.len(), 2);
        assert_eq!(used, 80);
        assert_eq!(omitted, 1);
    }

    #[test]
    fn continues_past_an_item_that_does_not_fit() {
        let candidates = vec![
            (None, "big".into(), 90),
            (None, "small".into(), 5),
        ];
        let (items, used, omitted) = pack_greedy(10, candidates);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "small");
        assert_eq!(used, 5);
        assert_eq!(omitted, 1);
    }

    #[test]
    fn zero_budget_packs_nothing() {
        let candidates = vec![(None, "a".into(), 1)];
        let (items, used, omitted) = pack_greedy(0, candidates);
        assert!(items.is_empty());
        assert_eq!(used, 0);
        assert_eq!(omitted, 1);
    }

    #[test]
    fn empty_candidates_yields_empty_section() {
        let (items, used, omitted) = pack_greedy(1000, vec![]);
        assert!(items.is_empty());
        assert_eq!(used, 0);
        assert_eq!(omitted, 0);
    }
}
