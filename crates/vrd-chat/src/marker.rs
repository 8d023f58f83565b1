/// Short-lived record of a session this conversation just created itself.
///
/// When a send creates a session, the owner of the conversation is told the
/// new id and typically selects it right back. The marker lets that one
/// selection skip the history reload, which would otherwise replace the
/// optimistic messages already on screen. It is consumed by the first
/// matching check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentMarker(Option<String>);

impl IntentMarker {
    pub fn set(&mut self, session_id: &str) {
        self.0 = Some(session_id.to_string());
    }

    /// True exactly once for the marked id; the marker is cleared on a match.
    pub fn consume(&mut self, session_id: &str) -> bool {
        if self.0.as_deref() == Some(session_id) {
            self.0 = None;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}
