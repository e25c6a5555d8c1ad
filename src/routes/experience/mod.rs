mod handler;

pub use handler::{create_experience, delete_experience, list_experience, update_experience};
