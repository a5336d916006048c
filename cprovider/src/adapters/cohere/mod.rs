mod provider;
mod serde_api;
mod transport;
mod types;

pub use provider::{CohereProvider, HistoryPolicy};
pub use transport::{COHERE_BASE_URL, CohereHttpTransport, CohereTransport};
pub use types::{
    CohereFinishReason, CohereHistoryEntry, CohereRequest, CohereResponse, CohereRole,
    CohereUsage,
};
