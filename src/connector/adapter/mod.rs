mod gemini_client;
mod image_loader;
mod mock_generative_model;

pub use gemini_client::*;
pub use image_loader::*;
pub use mock_generative_model::*;
