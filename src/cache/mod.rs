mod pages;

pub use pages::{PageCache, SavedPage};
