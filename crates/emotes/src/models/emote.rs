use serde::Deserialize;

use emotes_core::emote::{EmotePatch, NewEmote};

/// Request body for creating an emote. The id is always generated.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmote {
    pub trigger: String,
    pub url: String,
}

impl CreateEmote {
    pub fn into_new_emote(self) -> NewEmote {
        NewEmote::new(self.trigger, self.url)
    }
}

/// Request body for updating an emote. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmote {
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl UpdateEmote {
    /// Converts the request into a patch of the emote at `id`.
    pub fn into_patch(self, id: impl Into<String>) -> EmotePatch {
        EmotePatch {
            id: id.into(),
            trigger: self.trigger,
            url: self.url,
        }
    }
}
