mod compare_cars;
mod send_chat_message;

pub use compare_cars::*;
pub use send_chat_message::*;
