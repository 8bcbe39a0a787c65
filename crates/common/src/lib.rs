pub mod config;
pub mod document;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use config::AppConfig;
pub use document::DocumentKind;
pub use error::DocsumError;
pub type Result<T> = std::result::Result<T, DocsumError>;
