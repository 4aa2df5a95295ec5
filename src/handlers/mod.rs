// src/handlers/mod.rs
pub mod build_hook;
pub mod data;
pub mod error;
pub mod pages;
pub mod views;
