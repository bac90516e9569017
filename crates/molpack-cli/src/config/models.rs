use molpack::engine::config::RunConfig;
use molpack::workflows::pack::PackRequest;

pub struct AppConfig {
    pub request: PackRequest,
    pub run_config: RunConfig,
}
