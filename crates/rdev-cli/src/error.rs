use std::error::Error as StdError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing env var: {0}")]
    MissingEnv(&'static str),

    #[error(transparent)]
    Infra(#[from] rdev_infra::Error),

    #[error("failed to write output")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Render an error and every `source()` beneath it, joined with `: `.
pub fn report(err: &dyn StdError) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
