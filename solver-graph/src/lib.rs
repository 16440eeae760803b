//! # solver-graph
//!
//! Query layer over the problem knowledge graph: typed nodes
//! (problems, constraints, patterns, strategies) and typed relations,
//! with the deterministic ordering guarantees the retriever depends on.
//!
//! The write surface exists for the ingestion boundary and for test
//! seeding; the solving core only ever reads.

mod store;

pub use store::MemoryGraphStore;
