use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{EditOp, EditStatus, EditTargetType};

/// Op-specific payload carried by a [`MemoryEdit`] (§3). Only the fields
/// relevant to `op` are populated; parsed from `MemoryEdit::patch` via
/// [`MemoryEdit::patch_typed`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EditPatch {
    /// `amend`: replacement text.
    #[serde(default)]
    pub text: Option<String>,
    /// `amend`: replacement importance; `attenuate`: absolute override.
    #[serde(default)]
    pub importance: Option<f32>,
    /// `attenuate`: amount subtracted from the effective importance.
    #[serde(default)]
    pub importance_delta: Option<f32>,
    /// `block`: channel reads on this channel exclude the target from.
    #[serde(default)]
    pub channel: Option<String>,
}

/// A non-destructive alteration of a target chunk/decision (§3). Only
/// `status = approved` edits affect effective views (`memoryd-overlay`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEdit {
    pub edit_id: String,
    pub tenant_id: String,
    pub target_type: EditTargetType,
    pub target_id: String,
    pub op: EditOp,
    pub patch: serde_json::Value,
    pub reason: Option<String>,
    pub proposed_by: String,
    pub status: EditStatus,
    pub created_at: DateTime<Utc>,
    pub applied_at: Option<DateTime<Utc>>,
}

impl MemoryEdit {
    pub fn patch_typed(&self) -> Result<EditPatch, serde_json::Error> {
        serde_json::from_value(self.patch.clone())
    }

    pub fn is_approved(&self) -> bool {
        matches!(self.status, EditStatus::Approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn edit(op: EditOp, patch: serde_json::Value) -> MemoryEdit {
        MemoryEdit {
            edit_id: "edt_1".into(),
            tenant_id: "t1".into(),
            target_type: EditTargetType::Chunk,
            target_id: "chk_1".into(),
            op,
            patch,
            reason: None,
            proposed_by: "agent1".into(),
            status: EditStatus::Approved,
            created_at: Utc::now(),
            applied_at: None,
        }
    }

    #[test]
    fn amend_patch_parses_text_and_importance() {
        let e = edit(EditOp::Amend, json!({"text": "John Doe", "importance": 0.8}));
        let p = e.patch_typed().unwrap();
        assert_eq!(p.text.as_deref(), Some("John Doe"));
        assert_eq!(p.importance, Some(0.8));
    }

    #[test]
    fn attenuate_patch_parses_delta() {
        let e = edit(EditOp::Attenuate, json!({"importance_delta": 0.3}));
        let p = e.patch_typed().unwrap();
        assert_eq!(p.importance_delta, Some(0.3));
    }

    #[test]
    fn block_patch_parses_channel() {
        let e = edit(EditOp::Block, json!({"channel": "public"}));
        let p = e.patch_typed().unwrap();
        assert_eq!(p.channel.as_deref(), Some("public"));
    }

    #[test]
    fn empty_patch_parses_to_all_none() {
        let e = edit(EditOp::Retract, json!({}));
        let p = e.patch_typed().unwrap();
        assert!(p.text.is_none());
        assert!(p.importance.is_none());
        assert!(p.importance_delta.is_none());
        assert!(p.channel.is_none());
    }

    #[test]
    fn is_approved_reflects_status() {
        let mut e = edit(EditOp::Retract, json!({}));
        assert!(e.is_approved());
        e.status = EditStatus::Proposed;
        assert!(!e.is_approved());
    }
}
