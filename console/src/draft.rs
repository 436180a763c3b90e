//! Job draft lifecycle
//!
//! A draft holds the compiled workload-definition text while the confirm
//! screen is active. It is created per visit, submitted at most once, and
//! discarded when the operator leaves without submitting.

use serde::{Deserialize, Serialize};

/// Draft state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftState {
    /// Created, no compiled text yet
    Unset,

    /// Holds compiled workload-definition text
    Compiled,

    /// Handed to the scheduler; terminal
    Submitted,

    /// Released without submission; terminal
    Discarded,
}

/// Draft event
#[derive(Debug, Clone)]
pub enum DraftEvent {
    /// Attach compiled text
    Compile(String),

    /// Submission to the scheduler succeeded
    Submit,

    /// Operator left the screen without submitting
    Discard,
}

/// A transient workload record bound to one confirm-screen visit
#[derive(Debug, Clone)]
pub struct JobDraft {
    id: String,
    spec: Option<String>,
    state: DraftState,
}

impl JobDraft {
    /// Create a new draft with no compiled text
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            spec: None,
            state: DraftState::Unset,
        }
    }

    /// Get the draft id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get current state
    pub fn state(&self) -> &DraftState {
        &self.state
    }

    /// Get the compiled text, if any
    pub fn spec(&self) -> Option<&str> {
        self.spec.as_deref()
    }

    /// Process an event and transition state
    ///
    /// Re-compiling an already compiled draft is allowed: the confirm
    /// screen recompiles on every render and the result is identical for
    /// identical input. A failed submission raises no event, so the draft
    /// stays compiled and resubmittable.
    pub fn process(&mut self, event: DraftEvent) -> Result<(), String> {
        let new_state = match (&self.state, &event) {
            (DraftState::Unset, DraftEvent::Compile(text)) => {
                self.spec = Some(text.clone());
                DraftState::Compiled
            }
            (DraftState::Compiled, DraftEvent::Compile(text)) => {
                self.spec = Some(text.clone());
                DraftState::Compiled
            }

            (DraftState::Compiled, DraftEvent::Submit) => DraftState::Submitted,

            (DraftState::Unset, DraftEvent::Discard) => DraftState::Discarded,
            (DraftState::Compiled, DraftEvent::Discard) => DraftState::Discarded,

            // Submitted and Discarded are terminal
            (state, event) => {
                return Err(format!("Invalid transition: {:?} -> {:?}", state, event));
            }
        };

        self.state = new_state;
        Ok(())
    }
}

impl Default for JobDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_submit_path() {
        let mut draft = JobDraft::new();
        assert_eq!(draft.state(), &DraftState::Unset);
        assert!(draft.spec().is_none());

        draft.process(DraftEvent::Compile("job {}".to_string())).unwrap();
        assert_eq!(draft.state(), &DraftState::Compiled);
        assert_eq!(draft.spec(), Some("job {}"));

        draft.process(DraftEvent::Submit).unwrap();
        assert_eq!(draft.state(), &DraftState::Submitted);
    }

    #[test]
    fn test_draft_recompile_is_allowed() {
        let mut draft = JobDraft::new();
        draft.process(DraftEvent::Compile("a".to_string())).unwrap();
        draft.process(DraftEvent::Compile("a".to_string())).unwrap();
        assert_eq!(draft.state(), &DraftState::Compiled);
        assert_eq!(draft.spec(), Some("a"));
    }

    #[test]
    fn test_draft_discard_before_and_after_compile() {
        let mut before = JobDraft::new();
        before.process(DraftEvent::Discard).unwrap();
        assert_eq!(before.state(), &DraftState::Discarded);

        let mut after = JobDraft::new();
        after.process(DraftEvent::Compile("a".to_string())).unwrap();
        after.process(DraftEvent::Discard).unwrap();
        assert_eq!(after.state(), &DraftState::Discarded);
    }

    #[test]
    fn test_terminal_states_reject_events() {
        let mut draft = JobDraft::new();
        draft.process(DraftEvent::Compile("a".to_string())).unwrap();
        draft.process(DraftEvent::Submit).unwrap();

        assert!(draft.process(DraftEvent::Discard).is_err());
        assert!(draft.process(DraftEvent::Compile("b".to_string())).is_err());
    }

    #[test]
    fn test_submit_requires_compiled() {
        let mut draft = JobDraft::new();
        assert!(draft.process(DraftEvent::Submit).is_err());
    }
}
