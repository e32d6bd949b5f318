pub mod catalog;
pub mod diagnostics;
pub mod submission;
