use std::sync::Arc;

use domains::ThreadRepository;
use services::{ReplyService, ThreadService};

use crate::metrics::Metrics;

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub threads: ThreadService,
    pub replies: ReplyService,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(repo: Arc<dyn ThreadRepository>) -> Self {
        Self {
            threads: ThreadService::new(repo.clone()),
            replies: ReplyService::new(repo),
            metrics: Arc::new(Metrics::new()),
        }
    }
}
