use serde::Serialize;
use uuid::Uuid;

/// Who is making the request, resolved once per request by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "user_id", rename_all = "snake_case")]
pub enum Subject {
    Anonymous,
    Authenticated(Uuid),
}

impl Subject {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Subject::Anonymous => None,
            Subject::Authenticated(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Subject::Authenticated(_))
    }
}

impl From<Option<Uuid>> for Subject {
    fn from(user_id: Option<Uuid>) -> Self {
        user_id.map_or(Subject::Anonymous, Subject::Authenticated)
    }
}
