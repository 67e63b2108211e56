use crate::app_config::ResultsConfig;

#[derive(Clone, Default)]
pub struct AppState {
    pub results: ResultsConfig,
}
