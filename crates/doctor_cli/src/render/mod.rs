//! Diagnosis renderers for the terminal and the browser.

pub mod html;
pub mod text;
