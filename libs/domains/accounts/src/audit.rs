//! Who-and-when bookkeeping shared by every catalog row.
//!
//! `created_by`/`updated_by` reference users; deleting a user nulls them
//! out (the Postgres schema does this with `ON DELETE SET NULL`, in-memory
//! stores call [`AuditStamp::forget_user`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuditStamp {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

impl AuditStamp {
    /// Stamp for a freshly created row. The actor is both creator and last editor.
    pub fn new(actor: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            created_by: actor,
            updated_by: actor,
        }
    }

    /// Record a save. A save without an actor leaves `updated_by` alone.
    pub fn touch(&mut self, actor: Option<Uuid>) {
        self.updated_at = Utc::now().max(self.created_at);
        if actor.is_some() {
            self.updated_by = actor;
        }
    }

    /// Clear every reference to a deleted user. Returns how many were cleared.
    pub fn forget_user(&mut self, user_id: Uuid) -> u64 {
        let mut cleared = 0;
        if self.created_by == Some(user_id) {
            self.created_by = None;
            cleared += 1;
        }
        if self.updated_by == Some(user_id) {
            self.updated_by = None;
            cleared += 1;
        }
        cleared
    }
}

impl Default for AuditStamp {
    fn default() -> Self {
        Self::new(None)
    }
}
