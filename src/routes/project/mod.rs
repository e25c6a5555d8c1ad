mod handler;

pub use handler::{create_project, delete_project, list_projects, update_project};
