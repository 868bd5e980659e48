/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(
        environment: impl Into<String>,
        json_format: bool,
        default_filter: impl Into<String>,
    ) -> Self {
        Self {
            environment: environment.into(),
            json_format,
            default_filter: default_filter.into(),
        }
    }
}
