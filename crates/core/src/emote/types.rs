use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logging::LogValue;

use super::{EmoteError, IdGenerator};

/// An emote: a trigger text that activates the resource at `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emote {
    pub id: String,
    pub trigger: String,
    pub url: String,
}

impl Emote {
    /// Builds an emote from already-known fields.
    ///
    /// All three fields must be non-empty.
    pub fn from_parts(
        id: impl Into<String>,
        trigger: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, EmoteError> {
        let emote = Self {
            id: id.into(),
            trigger: trigger.into(),
            url: url.into(),
        };

        if emote.id.is_empty() || emote.trigger.is_empty() || emote.url.is_empty() {
            return Err(EmoteError::not_enough_attributes());
        }

        Ok(emote)
    }

    /// Creates a brand new emote with a freshly generated id.
    pub fn create_new(new_emote: NewEmote, ids: &dyn IdGenerator) -> Self {
        Self {
            id: ids.next_id(),
            trigger: new_emote.trigger,
            url: new_emote.url,
        }
    }
}

impl LogValue for Emote {
    fn to_json(&self) -> Option<Value> {
        serde_json::to_value(self).ok()
    }
}

/// Fields of an emote that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmote {
    pub trigger: String,
    pub url: String,
}

impl NewEmote {
    pub fn new(trigger: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            url: url.into(),
        }
    }

    /// Checks that both fields are non-empty after trimming.
    pub fn validate(&self) -> Result<(), EmoteError> {
        if self.trigger.trim().is_empty() {
            return Err(EmoteError::EmptyTrigger);
        }
        if self.url.trim().is_empty() {
            return Err(EmoteError::EmptyUrl);
        }
        Ok(())
    }
}

/// A partial update of an existing emote. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotePatch {
    pub id: String,
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl EmotePatch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Returns true when the patch sets no field.
    pub fn is_empty(&self) -> bool {
        self.trigger.is_none() && self.url.is_none()
    }

    /// Rejects supplied fields that are empty after trimming.
    pub fn validate(&self) -> Result<(), EmoteError> {
        if self.trigger.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(EmoteError::EmptyTrigger);
        }
        if self.url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(EmoteError::EmptyUrl);
        }
        Ok(())
    }
}
