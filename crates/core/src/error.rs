use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid UTC offset '{0}', expected 'local', 'Z', or '+HH:MM'")]
    InvalidOffset(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
