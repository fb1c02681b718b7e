pub type PlotResult<T> = Result<T, PlotError>;

/// Errors that abort a run before anything reaches the plotting engine.
#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    #[error("unknown layer type '{0}'")]
    UnknownLayer(String),

    #[error("if the global layer (--global, -G) is used, it must be set first")]
    GlobalNotFirst,

    #[error("usage error: {0}")]
    Usage(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("engine error: {0}")]
    Engine(String),
}

impl PlotError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }
}
