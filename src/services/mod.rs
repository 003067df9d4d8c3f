pub mod gemini_client;
pub mod generation;
pub mod openai_client;
pub mod prompt;
pub mod response_parser;

pub use gemini_client::GeminiClient;
pub use generation::{HttpSettings, Provider, TextGenerator};
pub use openai_client::OpenAIClient;
pub use prompt::PromptBuilder;
pub use response_parser::{parse_itinerary, strip_fences};
