use thiserror::Error;

#[derive(Error, Debug)]
pub enum SludgeError {
    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Catalog table is empty: {0}")]
    EmptyCatalogTable(&'static str),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SludgeError>;
