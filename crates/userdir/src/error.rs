#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("User {0} not found")]
    UserNotFound(u64),

    #[error("Invalid user ID or URL: {0}")]
    InvalidUser(String),
}
