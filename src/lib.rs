use std::sync::Arc;

use crate::config::Config;
use crate::mail::Mailer;
use crate::store::DocumentStore;

pub mod auth;
pub mod config;
pub mod error;
pub mod mail;
pub mod middleware;
pub mod models;
pub mod reply;
pub mod router;
pub mod routes;
pub mod store;
pub mod utils;

use auth::Authenticator;
use reply::ReplyWorkflow;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub mailer: Arc<dyn Mailer>,
    pub auth: Arc<Authenticator>,
    pub replies: Arc<ReplyWorkflow>,
}

impl AppState {
    /// Wires the authenticator and the reply workflow around the given
    /// collaborators.
    pub fn new(config: Config, store: Arc<dyn DocumentStore>, mailer: Arc<dyn Mailer>) -> Self {
        let auth = Arc::new(Authenticator::new(&config.admin));
        let replies = Arc::new(ReplyWorkflow::new(
            store.clone(),
            mailer.clone(),
            config.mail.sender(),
            config.mail.timeout(),
        ));

        Self {
            config,
            store,
            mailer,
            auth,
            replies,
        }
    }
}
