pub mod capsules;
pub mod recent_window;
pub mod relevant_decisions;
pub mod retrieved_evidence;
pub mod rules;
pub mod task_state;
