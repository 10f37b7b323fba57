pub mod booking;
pub mod content;
pub mod directory;
pub mod mutation;
pub mod page;
pub mod resource;
pub mod types;
