mod handler;

pub use handler::{delete_message, list_messages, reply_to_message, submit_contact};
