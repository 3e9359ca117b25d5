//! Domain types for the bookplate illustration generator.
//!
//! Image identifiers, the prompt table, output naming conventions,
//! artifact persistence, and runtime configuration. This crate has no
//! HTTP dependency -- everything network-facing lives in
//! `bookplate-comfyui`.

pub mod config;
pub mod id;
pub mod naming;
pub mod prompts;
pub mod storage;
