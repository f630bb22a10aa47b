mod error;
mod id;
mod types;

pub use error::{EmoteError, NOT_ENOUGH_ATTRIBUTES};
pub use id::{IdGenerator, UuidGenerator};
pub use types::{Emote, EmotePatch, NewEmote};
