pub mod candidate;
pub mod collection;
pub mod page;
pub mod source;
