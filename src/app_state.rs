use std::sync::Arc;
use crate::{config::Config, service::CardManager};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cards: Arc<dyn CardManager>,
}
