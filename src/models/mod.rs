pub mod book;
pub mod openlibrary;
pub mod quote;
