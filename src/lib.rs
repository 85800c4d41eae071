//! Core library functions for the social graph analyzer

pub mod config;
pub mod data;
pub mod graph;
pub mod paths;
pub mod mst;
pub mod centrality;
pub mod community;
pub mod coloring;
pub mod stats;
pub mod storage;

pub use anyhow::{Result, anyhow};
