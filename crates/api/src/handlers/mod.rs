//! Handler functions, grouped by resource.

pub mod admin;
pub mod favorites;
pub mod gallery;
