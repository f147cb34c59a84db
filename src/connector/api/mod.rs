pub mod container;
pub mod controller;
pub mod render;
pub mod router;
pub mod session;

pub use container::{Container, ContainerConfig};
pub use controller::{SessionController, SessionReply};
pub use router::Router;
pub use session::ChatSession;
