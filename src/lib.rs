pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{CompareCarsUseCase, GenerativeModel, SendChatMessageUseCase};

pub use cli::{Commands, OutputFormat};

pub use connector::{
    ChatSession, Container, ContainerConfig, GeminiClient, ImageLoader, MockGenerativeModel,
    Router, SessionController, SessionReply,
};

pub use domain::{
    CarSpecs, ChatMessage, Citation, ComparisonData, ComparisonRequest, ContentPart, DomainError,
    GenerationRequest, GenerationResponse, GroundingLink, InlineImage, Locale, Role,
    MISSING_SPEC_VALUE,
};
