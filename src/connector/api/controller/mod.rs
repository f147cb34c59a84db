pub mod chat_controller;
pub mod compare_controller;
pub mod session_controller;

pub use chat_controller::ChatController;
pub use compare_controller::CompareController;
pub use session_controller::{SessionController, SessionReply};
