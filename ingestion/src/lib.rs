pub mod linker;
pub mod pipeline;
pub mod summary;

pub use linker::PlaceLinker;
pub use pipeline::IngestionPipeline;
pub use summary::{build_ai_context, AI_CONTEXT_MAX_CHARS};
