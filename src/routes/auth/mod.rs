mod handler;

pub use handler::{LoginRequest, check_session, login, logout};
