//! Submission correlation
//!
//! The dispatcher stamps each line of input with a [`SubmissionId`]; every
//! event logged while handling that line carries it as `submission_id`.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one dispatched line, a UUIDv7 so ids sort roughly by time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SubmissionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_submission_gets_its_own_id() {
        assert_ne!(SubmissionId::new(), SubmissionId::new());
        assert_eq!(SubmissionId::new().as_uuid().get_version_num(), 7);
    }

    #[test]
    fn test_serializes_as_bare_uuid_string() {
        let uuid = Uuid::nil();
        let id = SubmissionId::from(uuid);

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
        assert_eq!(serde_json::from_str::<SubmissionId>(&json).unwrap(), id);
        assert_eq!(id.to_string(), uuid.to_string());
    }
}
