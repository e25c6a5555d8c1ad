mod handler;

pub use handler::{create_review, delete_review, list_reviews, update_review};
