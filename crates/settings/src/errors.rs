use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("toml serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("section already registered: {0}")]
    AlreadyRegistered(&'static str),

    #[error("section not registered: {0}")]
    NotRegistered(&'static str),

    #[error("invalid section {section}: {reason}")]
    Invalid {
        section: &'static str,
        reason: &'static str,
    },
}
