mod emote;

pub use emote::{CreateEmote, UpdateEmote};
