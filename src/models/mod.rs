pub mod event;
pub mod gallery;
pub mod mix;
pub mod submission;

pub use event::{Event, EventStatus};
pub use gallery::{GalleryDocument, GalleryItem, MediaType};
pub use mix::Mix;
pub use submission::{SubmissionRecord, SubmissionRequest};

// Sheets обрезает пустые ячейки в конце строки, поэтому короткая строка даёт None.
pub(crate) fn cell(row: &[String], index: usize) -> Option<String> {
    row.get(index).cloned()
}
