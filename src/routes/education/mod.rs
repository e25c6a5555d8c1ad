mod handler;

pub use handler::{create_education, delete_education, list_education, update_education};
