pub mod codegen;
pub mod graph;
pub mod retriever;
pub mod vector;

pub use codegen::{CodeRequest, ICodeWriter};
pub use graph::IGraphStore;
pub use retriever::IRetriever;
pub use vector::{IEmbeddingProvider, IVectorIndex};
