//! Redaction settings collected before submission.

use serde::{Deserialize, Serialize};

use crate::vocabulary::{ConsentTier, EntityCategory, RedactionScope};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionConfiguration {
    pub scope: Option<RedactionScope>,
    /// Selection order is preserved; it is the order sent on the wire.
    pub custom_entity_types: Vec<EntityCategory>,
    pub consent_tier: Option<ConsentTier>,
    pub authorization_acknowledged: bool,
}

impl RedactionConfiguration {
    pub fn set_scope(&mut self, scope: RedactionScope) {
        if scope != RedactionScope::Custom {
            self.custom_entity_types.clear();
        }
        self.scope = Some(scope);
    }

    pub fn set_consent_tier(&mut self, tier: ConsentTier) {
        self.consent_tier = Some(tier);
    }

    pub fn set_authorization_acknowledged(&mut self, acknowledged: bool) {
        self.authorization_acknowledged = acknowledged;
    }

    /// Returns false when the tag is already selected.
    pub fn add_entity_type(&mut self, entity: EntityCategory) -> bool {
        if self.custom_entity_types.contains(&entity) {
            return false;
        }
        self.custom_entity_types.push(entity);
        true
    }

    pub fn remove_entity_type(&mut self, entity: EntityCategory) -> bool {
        let before = self.custom_entity_types.len();
        self.custom_entity_types.retain(|e| *e != entity);
        before != self.custom_entity_types.len()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_custom(&self) -> bool {
        self.scope == Some(RedactionScope::Custom)
    }
}
