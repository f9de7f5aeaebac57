use memoryd_model::Channel;

/// `buildACB` request (§4.H): the one call `memoryd-service`'s
/// `POST /acb/build` handler makes per agent turn.
#[derive(Debug, Clone)]
pub struct AcbRequest {
    pub tenant_id: String,
    pub session_id: String,
    pub agent_id: String,
    pub channel: Channel,
    pub intent: String,
    pub query_text: String,
    pub max_tokens: Option<i32>,
    pub subject_type: Option<String>,
    pub subject_id: Option<String>,
    pub project_id: Option<String>,
    pub include_capsules: bool,
    pub include_quarantined: bool,
}

/// Default ACB token budget when the caller doesn't supply one (§6 bit-exact
/// formats).
pub const DEFAULT_MAX_TOKENS: i32 = 65_000;
