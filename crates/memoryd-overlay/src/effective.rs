// SPDX-License-Identifier: Apache-2.0
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use memoryd_model::{Channel, Chunk, EditOp, EventKind, MemoryEdit, ScopeLabels, Sensitivity};

/// A chunk with all approved edits folded over it (§4.E rule 1). Retracted
/// chunks never produce one of these — `fold_chunk` returns `None`.
#[derive(Debug, Clone)]
pub struct EffectiveChunk {
    pub chunk_id: String,
    pub tenant_id: String,
    pub event_id: String,
    pub ts: DateTime<Utc>,
    pub kind: EventKind,
    pub channel: Channel,
    pub sensitivity: Sensitivity,
    pub tags: Vec<String>,
    pub labels: ScopeLabels,
    pub effective_text: String,
    pub effective_importance: f32,
    pub is_quarantined: bool,
    pub blocked_channels: HashSet<String>,
    pub edits_applied_count: usize,
}

/// Fold `edits` (already filtered to `status = approved` and this chunk's
/// target) over `chunk`. Returns `None` if any `retract` edit is present.
pub fn fold_chunk(chunk: &Chunk, edits: &[MemoryEdit]) -> Option<EffectiveChunk> {
    if edits.iter().any(|e| e.op == EditOp::Retract) {
        return None;
    }

    let mut effective_text = chunk.text.clone();
    let mut last_amend_importance = None;
    let mut last_attenuate_absolute = None;
    let mut attenuate_delta_sum = 0.0f32;
    let mut is_quarantined = false;
    let mut blocked_channels = HashSet::new();

    for edit in edits {
        let patch = match edit.patch_typed() {
            Ok(p) => p,
            Err(_) => continue,
        };
        match edit.op {
            EditOp::Amend => {
                if let Some(text) = patch.text {
                    effective_text = text;
                }
                if let Some(importance) = patch.importance {
                    last_amend_importance = Some(importance);
                }
            }
            EditOp::Attenuate => {
                if let Some(absolute) = patch.importance {
                    last_attenuate_absolute = Some(absolute);
                }
                if let Some(delta) = patch.importance_delta {
                    attenuate_delta_sum += delta;
                }
            }
            EditOp::Quarantine => is_quarantined = true,
            EditOp::Block => {
                if let Some(channel) = patch.channel {
                    blocked_channels.insert(channel);
                }
            }
            EditOp::Retract => unreachable!("filtered above"),
        }
    }

    let mut effective_importance = chunk.importance;
    if let Some(importance) = last_amend_importance {
        effective_importance = importance;
    }
    if let Some(absolute) = last_attenuate_absolute {
        effective_importance = absolute;
    }
    effective_importance = (effective_importance - attenuate_delta_sum).clamp(0.0, 1.0);

    Some(EffectiveChunk {
        chunk_id: chunk.chunk_id.clone(),
        tenant_id: chunk.tenant_id.clone(),
        event_id: chunk.event_id.clone(),
        ts: chunk.ts,
        kind: chunk.kind,
        channel: chunk.channel,
        sensitivity: chunk.sensitivity,
        tags: chunk.tags.clone(),
        labels: chunk.labels.clone(),
        effective_text,
        effective_importance,
        is_quarantined,
        blocked_channels,
        edits_applied_count: edits.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use memoryd_model::{EditStatus, EditTargetType};
    use serde_json::json;

    fn base_chunk() -> Chunk {
        Chunk {
            chunk_id: "chk_1".into(),
            tenant_id: "t1".into(),
            event_id: "evt_1".into(),
            ts: Utc::now(),
            kind: EventKind::Message,
            channel: Channel::Private,
            sensitivity: Sensitivity::Low,
            tags: vec![],
            token_est: 10,
            importance: 0.5,
            text: "original text".into(),
            labels: ScopeLabels {
                scope: None,
                subject_type: None,
                subject_id: None,
                project_id: None,
            },
        }
    }

    fn edit(op: EditOp, patch: serde_json::Value) -> MemoryEdit {
        MemoryEdit {
            edit_id: format!("edt_{op:?}"),
            tenant_id: "t1".into(),
            target_type: EditTargetType::Chunk,
            target_id: "chk_1".into(),
            op,
            patch,
            reason: None,
            proposed_by: "agent_1".into(),
            status: EditStatus::Approved,
            created_at: Utc::now(),
            applied_at: Some(Utc::now()),
        }
    }

    #[test]
    fn no_edits_returns_stored_values_unchanged() {
        let chunk = base_chunk();
        let effective = fold_chunk(&chunk, &[]).unwrap();
        assert_eq!(effective.effective_text, "original text");
        assert_eq!(effective.effective_importance, 0.5);
        assert_eq!(effective.edits_applied_count, 0);
    }

    #[test]
    fn retract_omits_the_chunk() {
        let chunk = base_chunk();
        let edits = vec![edit(EditOp::Retract, json!({}))];
        assert!(fold_chunk(&chunk, &edits).is_none());
    }

    #[test]
    fn amend_replaces_text_and_importance() {
        let chunk = base_chunk();
        let edits = vec![edit(EditOp::Amend, json!({"text": "corrected", "importance": 0.9}))];
        let effective = fold_chunk(&chunk, &edits).unwrap();
        assert_eq!(effective.effective_text, "corrected");
        assert_eq!(effective.effective_importance, 0.9);
    }

    #[test]
    fn newest_amend_wins_over_older_amend() {
        let chunk = base_chunk();
        let edits = vec![
            edit(EditOp::Amend, json!({"text": "first correction"})),
            edit(EditOp::Amend, json!({"text": "second correction"})),
        ];
        let effective = fold_chunk(&chunk, &edits).unwrap();
        assert_eq!(effective.effective_text, "second correction");
    }

    #[test]
    fn attenuate_delta_subtracts_from_importance() {
        let chunk = base_chunk();
        let edits = vec![edit(EditOp::Attenuate, json!({"importance_delta": 0.3}))];
        let effective = fold_chunk(&chunk, &edits).unwrap();
        assert!((effective.effective_importance - 0.2).abs() < 1e-6);
    }

    #[test]
    fn multiple_attenuate_deltas_sum() {
        let chunk = base_chunk();
        let edits = vec![
            edit(EditOp::Attenuate, json!({"importance_delta": 0.2})),
            edit(EditOp::Attenuate, json!({"importance_delta": 0.2})),
        ];
        let effective = fold_chunk(&chunk, &edits).unwrap();
        assert!((effective.effective_importance - 0.1).abs() < 1e-6);
    }

    #[test]
    fn attenuate_clamps_at_zero() {
        let chunk = base_chunk();
        let edits = vec![edit(EditOp::Attenuate, json!({"importance_delta": 10.0}))];
        let effective = fold_chunk(&chunk, &edits).unwrap();
        assert_eq!(effective.effective_importance, 0.0);
    }

    #[test]
    fn quarantine_sets_flag() {
        let chunk = base_chunk();
        let edits = vec![edit(EditOp::Quarantine, json!({}))];
        let effective = fold_chunk(&chunk, &edits).unwrap();
        assert!(effective.is_quarantined);
    }

    #[test]
    fn block_adds_to_blocked_channels() {
        let chunk = base_chunk();
        let edits = vec![edit(EditOp::Block, json!({"channel": "public"}))];
        let effective = fold_chunk(&chunk, &edits).unwrap();
        assert!(effective.blocked_channels.contains("public"));
    }

    #[test]
    fn edits_applied_count_reflects_all_folded_edits() {
        let chunk = base_chunk();
        let edits = vec![
            edit(EditOp::Amend, json!({"text": "x"})),
            edit(EditOp::Quarantine, json!({})),
        ];
        let effective = fold_chunk(&chunk, &edits).unwrap();
        assert_eq!(effective.edits_applied_count, 2);
    }
}
