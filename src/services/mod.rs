// src/services/mod.rs
pub mod build_hook;
pub mod data_source;
pub mod detail_view;
pub mod html;
pub mod list_view;
pub mod scheduler;
pub mod symbols;
pub mod valuation;
