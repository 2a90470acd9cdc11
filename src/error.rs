use thiserror::Error;

pub type Result<T> = std::result::Result<T, LocmapError>;

#[derive(Error, Debug)]
pub enum LocmapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] Box<reqwest::Error>),
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

// reqwest errors are boxed to keep the enum small
impl From<reqwest::Error> for LocmapError {
    fn from(err: reqwest::Error) -> Self {
        LocmapError::Http(Box::new(err))
    }
}

impl LocmapError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        LocmapError::Parse {
            line,
            message: message.into(),
        }
    }
}
