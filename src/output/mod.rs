// src/output/mod.rs
//! Output handling with clear separation of planning and execution.
//!
//! Response trees are built by pure functions in [`responses`]; the plan
//! says where the serialized tree goes; [`deliver`] performs the I/O.

pub mod responses;
mod types;
mod writer;

// Re-export the public interface
pub use responses::{
    content_preview, ExtractIdResponse, IngestionResponse, PageResponse, RawApiResponse,
};
pub use types::{DeliveryTarget, OutputPlan, OutputReport};
pub use writer::deliver;
