mod clients;

pub use clients::gemini::{
    Candidate, Content, ContentGenerator, GeminiClient, GenerateContentRequest,
    GenerateContentResponse, GroundingChunk, GroundingMetadata, Part, WebChunk,
};
