//! UI components for TideLM
//!
//! This module contains all user interface components built with Dioxus.

pub mod chat;
pub mod components;
pub mod layout;
pub mod sidebar;

pub use layout::Layout;
