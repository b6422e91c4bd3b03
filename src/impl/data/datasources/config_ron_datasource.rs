use std::fs;

use fractic_server_error::ServerError;
use ron::from_str;

use crate::{
    data::models::tracker_config_model::TrackerConfigModel,
    entities::TrackerConfig,
    errors::{InvalidRon, ReadError},
};

pub(crate) trait ConfigRonDatasource {
    fn from_string(&self, s: &str) -> Result<TrackerConfig, ServerError>;

    fn from_file<P>(&self, path: P) -> Result<TrackerConfig, ServerError>
    where
        P: AsRef<std::path::Path>;
}

pub(crate) struct ConfigRonDatasourceImpl;

impl ConfigRonDatasource for ConfigRonDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<TrackerConfig, ServerError> {
        let model: TrackerConfigModel =
            from_str(s).map_err(|e| InvalidRon::with_debug("TrackerConfig", &e))?;
        model.try_into()
    }

    fn from_file<P>(&self, path: P) -> Result<TrackerConfig, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        self.from_string(&fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?)
    }
}

/// Parses a tracker configuration, e.g. `(currency: "MYR", wallet_lookup_concurrency: 8)`.
/// Omitted fields take their defaults.
pub fn load_tracker_config(s: &str) -> Result<TrackerConfig, ServerError> {
    ConfigRonDatasourceImpl.from_string(s)
}

pub fn load_tracker_config_file<P>(path: P) -> Result<TrackerConfig, ServerError>
where
    P: AsRef<std::path::Path>,
{
    ConfigRonDatasourceImpl.from_file(path)
}
