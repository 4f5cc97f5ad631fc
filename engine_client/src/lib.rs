//! `engine_client`
//!
//! Client-side systems:
//! - Frame loop orchestration (input, physics, render)
//! - Headless input sources (idle, scripted timelines)
//! - An SVG turtle canvas for inspecting frames

pub mod canvas;
pub mod client;
pub mod input;

pub use client::WalkerClient;
