// Per-mode section sub-budgets (§4.G mode budgets table).
use crate::Mode;

/// Token allocations per ACB section for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeBudgets {
    pub rules: i32,
    pub task_state: i32,
    pub recent_window: i32,
    pub capsules: i32,
    pub retrieved_evidence: i32,
    pub relevant_decisions: i32,
}

/// Sub-budgets for `mode`, per the fixed table in §4.G.
pub fn budgets_for(mode: Mode) -> ModeBudgets {
    match mode {
        Mode::Task => ModeBudgets {
            rules: 10_000,
            task_state: 5_000,
            recent_window: 2_000,
            capsules: 4_000,
            retrieved_evidence: 28_000,
            relevant_decisions: 4_000,
        },
        Mode::Exploration => ModeBudgets {
            rules: 3_000,
            task_state: 1_000,
            recent_window: 15_000,
            capsules: 2_000,
            retrieved_evidence: 35_000,
            relevant_decisions: 6_000,
        },
        Mode::Debugging => ModeBudgets {
            rules: 5_000,
            task_state: 4_000,
            recent_window: 12_000,
            capsules: 0,
            retrieved_evidence: 25_000,
            relevant_decisions: 3_000,
        },
        Mode::Learning => ModeBudgets {
            rules: 8_000,
            task_state: 0,
            recent_window: 2_000,
            capsules: 2_000,
            retrieved_evidence: 40_000,
            relevant_decisions: 8_000,
        },
        Mode::General => ModeBudgets {
            rules: 6_000,
            task_state: 3_000,
            recent_window: 8_000,
            capsules: 4_000,
            retrieved_evidence: 28_000,
            relevant_decisions: 4_000,
        },
    }
}
