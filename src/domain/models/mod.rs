mod chat_message;
mod comparison;
mod generation;
mod inline_image;
mod locale;

pub use chat_message::*;
pub use comparison::*;
pub use generation::*;
pub use inline_image::*;
pub use locale::*;
