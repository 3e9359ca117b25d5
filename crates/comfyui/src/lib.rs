//! ComfyUI REST client library.
//!
//! Provides the Qwen text-to-image workflow builder, HTTP API wrappers
//! (submission, history, artifact download, connectivity check), typed
//! history parsing, and the completion polling loop used by the batch
//! driver.

pub mod api;
pub mod history;
pub mod poll;
pub mod workflow;
