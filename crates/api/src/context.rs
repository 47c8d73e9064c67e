use beltline_core::SessionId;

/// Session context for a request.
///
/// Inserted by the session middleware; present for all storefront routes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionContext {
    session_id: SessionId,
}

impl SessionContext {
    pub fn new(session_id: SessionId) -> Self {
        Self { session_id }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }
}
