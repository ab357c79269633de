use crate::{application::moderation::use_case::ModerationUseCase, config::Config};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ModerationUseCase>,
    pub config: Config,
}
