use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::TaskStatus;

/// An open unit of work (§3). State machine: open → doing → done; any
/// state may transition to closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    pub tenant_id: String,
    pub title: String,
    pub details: Option<String>,
    pub status: TaskStatus,
    pub ts: DateTime<Utc>,
}

impl Task {
    /// Whether `next` is a legal transition from this task's current status.
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        use TaskStatus::*;
        match (self.status, next) {
            (_, Closed) => true,
            (Open, Doing) | (Open, Done) => true,
            (Doing, Done) => true,
            (a, b) => a == b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: TaskStatus) -> Task {
        Task {
            task_id: "tsk_1".into(),
            tenant_id: "t1".into(),
            title: "x".into(),
            details: None,
            status,
            ts: Utc::now(),
        }
    }

    #[test]
    fn open_to_doing_allowed() {
        assert!(task(TaskStatus::Open).can_transition_to(TaskStatus::Doing));
    }

    #[test]
    fn any_state_to_closed_allowed() {
        for s in [
            TaskStatus::Open,
            TaskStatus::Doing,
            TaskStatus::Done,
            TaskStatus::Closed,
        ] {
            assert!(task(s).can_transition_to(TaskStatus::Closed));
        }
    }

    #[test]
    fn done_to_open_not_allowed() {
        assert!(!task(TaskStatus::Done).can_transition_to(TaskStatus::Open));
    }

    #[test]
    fn closed_to_doing_not_allowed() {
        assert!(!task(TaskStatus::Closed).can_transition_to(TaskStatus::Doing));
    }

    #[test]
    fn same_state_is_a_noop_transition() {
        assert!(task(TaskStatus::Doing).can_transition_to(TaskStatus::Doing));
    }
}
