pub mod inference;
pub mod panels;
pub mod profile;
