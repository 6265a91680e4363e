use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "an API key is required: pass --api-key or set the {0} environment variable"
    )]
    ApiKeyNotFound(&'static str),
}
