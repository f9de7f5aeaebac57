// relevant_decisions section (§4.H step 3): active decisions matching the
// tsquery, packed by ts DESC. Reuses `build_tsquery`'s tokenizer (§9 FTS
// query construction) for the match test, since decisions have no FTS
// index of their own — a token matches if it appears as a substring
// anywhere in the decision text or its rationale lines.
use memoryd_core::estimate_tokens;
use memoryd_overlay::{build_tsquery, get_active_decisions};
use sqlx::PgPool;

use crate::error::AcbResult;
use crate::pack::pack_greedy;
use crate::response::{Omission, Section};

fn matches(decision_text: &str, rationale: &[String], tokens: &[&str]) -> bool {
    let haystack = format!("{} {}", decision_text, rationale.join(" ")).to_lowercase();
    tokens.iter().all(|token| haystack.contains(token))
}

pub async fn build(
    pool: &PgPool,
    tenant_id: &str,
    query_text: &str,
    local_budget: i32,
) -> AcbResult<(Section, Option<Omission>)> {
    let tsquery = build_tsquery(query_text);
    let tokens: Vec<&str> = tsquery.split(" & ").filter(|t| !t.is_empty()).collect();
    if tokens.is_empty() {
        return Ok((
            Section {
                name: "relevant_decisions",
                items: Vec::new(),
                token_est: 0,
            },
            None,
        ));
    }

    let mut decisions = get_active_decisions(pool, tenant_id).await?;
    decisions.retain(|d| matches(&d.decision, &d.rationale, &tokens));
    decisions.sort_by(|a, b| b.ts.cmp(&a.ts));

    let candidates: Vec<(Option<String>, String, i32)> = decisions
        .into_iter()
        .map(|d| {
            let text = format!("Decision: {}\nRationale: {}", d.decision, d.rationale.join("; "));
            let token_est = estimate_tokens(&text);
            (Some(d.decision_id), text, token_est)
        })
        .collect();

    let (items, used, omitted) = pack_greedy(local_budget, candidates);
    let section = Section {
        name: "relevant_decisions",
        items,
        token_est: used,
    };
    let omission = (omitted > 0).then_some(Omission {
        section: "relevant_decisions",
        omitted_count: omitted,
    });
    Ok((section, omission))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tokens_must_match_somewhere_in_text_or_rationale() {
        let tokens = ["postgres", "timeout"];
        assert!(matches(
            "switch to postgres",
            &["avoids connection timeout issues".to_string()],
            &tokens
        ));
        assert!(!matches("switch to postgres", &["no issues here".to_string()], &tokens));
    }

    #[test]
    fn empty_token_list_matches_vacuously() {
        assert!(matches("anything", &[], &[]));
    }
}
