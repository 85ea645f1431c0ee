use uuid::Uuid;

use crate::domain::ValidationError;

/// `from_id` follows `to_id`. The pair is unique.
#[derive(Debug, Clone)]
pub struct FollowRelation {
    pub id: Uuid,
    pub from_id: Uuid,
    pub to_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub fn ensure_not_self(from_id: Uuid, to_id: Uuid) -> Result<(), ValidationError> {
    if from_id == to_id {
        return Err(ValidationError::new("users cannot follow themselves"));
    }
    Ok(())
}
