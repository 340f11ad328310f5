pub mod analyst;
pub mod conversationalist;
pub mod refiner;
pub mod researcher;
pub mod verifier;
pub mod writer;

pub use analyst::AnalystRole;
pub use conversationalist::ConversationalistRole;
pub use refiner::{ParameterRefiner, RefinedParameters};
pub use researcher::ResearcherRole;
pub use verifier::VerifierRole;
pub use writer::WriterRole;
