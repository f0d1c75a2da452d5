//! Explicit delete confirmation tokens.
//!
//! # Responsibility
//! - Represent a pending "are you sure?" prompt as a value the presentation
//!   layer carries through its request/response cycle.
//!
//! # Invariants
//! - A token names exactly one entity and id.
//! - Confirming consumes the token; nothing about pending prompts is stored
//!   in process-wide state.
//! - Text form is `<entity>:<id>:<nonce>` and parses back losslessly.
//! - A token records intent, not authority. Confirmation does not check the
//!   nonce against issued tokens, so any well-formed token for a target
//!   deletes it. The nonce only keeps two prompts for one target distinct.

use crate::model::RecordId;
use crate::repo::EntityKind;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Entity addressed by a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeleteTarget {
    pub entity: EntityKind,
    pub id: RecordId,
}

impl DeleteTarget {
    pub fn project(id: RecordId) -> Self {
        Self {
            entity: EntityKind::Project,
            id,
        }
    }

    pub fn milestone(id: RecordId) -> Self {
        Self {
            entity: EntityKind::Milestone,
            id,
        }
    }

    pub fn resource(id: RecordId) -> Self {
        Self {
            entity: EntityKind::Resource,
            id,
        }
    }
}

impl Display for DeleteTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.entity, self.id)
    }
}

/// Issued by a delete request; must be handed back to confirm it.
///
/// Carries no authorization. See the module invariants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfirmationToken {
    target: DeleteTarget,
    nonce: Uuid,
}

impl ConfirmationToken {
    pub fn issue(target: DeleteTarget) -> Self {
        Self {
            target,
            nonce: Uuid::new_v4(),
        }
    }

    pub fn target(&self) -> DeleteTarget {
        self.target
    }
}

impl Display for ConfirmationToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.target.entity, self.target.id, self.nonce)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParseError(String);

impl Display for TokenParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid confirmation token `{}`", self.0)
    }
}

impl Error for TokenParseError {}

impl FromStr for ConfirmationToken {
    type Err = TokenParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || TokenParseError(value.to_string());
        let mut parts = value.trim().splitn(3, ':');

        let entity = parts
            .next()
            .and_then(EntityKind::parse)
            .ok_or_else(invalid)?;
        let id = parts
            .next()
            .and_then(|id| id.parse::<RecordId>().ok())
            .ok_or_else(invalid)?;
        let nonce = parts
            .next()
            .and_then(|nonce| Uuid::parse_str(nonce).ok())
            .ok_or_else(invalid)?;

        Ok(Self {
            target: DeleteTarget { entity, id },
            nonce,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfirmationToken, DeleteTarget};
    use crate::repo::EntityKind;

    #[test]
    fn token_text_parses_back() {
        let token = ConfirmationToken::issue(DeleteTarget::milestone(42));
        let parsed: ConfirmationToken = token.to_string().parse().unwrap();
        assert_eq!(parsed, token);
        assert_eq!(parsed.target().entity, EntityKind::Milestone);
        assert_eq!(parsed.target().id, 42);
    }

    #[test]
    fn tokens_for_same_target_differ() {
        let first = ConfirmationToken::issue(DeleteTarget::project(1));
        let second = ConfirmationToken::issue(DeleteTarget::project(1));
        assert_ne!(first, second);
        assert_eq!(first.target(), second.target());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!("project:1".parse::<ConfirmationToken>().is_err());
        assert!("team:1:00000000-0000-0000-0000-000000000000"
            .parse::<ConfirmationToken>()
            .is_err());
        assert!("project:x:00000000-0000-0000-0000-000000000000"
            .parse::<ConfirmationToken>()
            .is_err());
    }
}
