use core_config::{ConfigError, FromEnv, env_parse, env_parse_optional};

/// Dimension of OpenAI `text-embedding-3-small` / `ada-002` vectors.
pub const DEFAULT_DIMENSION: usize = 1536;
pub const DEFAULT_TOP_K: usize = 5;
/// Fits roughly 900 entries of 1536 dimensions in one batch request.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Shape and query limits of the index, fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Required length of every stored and queried vector
    pub dimension: usize,
    /// `top_k` used when a search omits it
    pub default_top_k: usize,
    /// Larger requested `top_k` values are clamped to this ceiling
    pub max_top_k: Option<usize>,
    /// Request body ceiling for the index routes
    pub max_body_bytes: usize,
}

impl IndexConfig {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            default_top_k: DEFAULT_TOP_K,
            max_top_k: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_default_top_k(mut self, default_top_k: usize) -> Self {
        self.default_top_k = default_top_k;
        self
    }

    pub fn with_max_top_k(mut self, max_top_k: usize) -> Self {
        self.max_top_k = Some(max_top_k);
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.dimension == 0 {
            return Err(ConfigError::InvalidValue {
                key: "VECTOR_DIMENSION".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }
        if self.default_top_k == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DEFAULT_TOP_K".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }
        if self.max_top_k == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "MAX_TOP_K".to_string(),
                details: "must be greater than zero when set".to_string(),
            });
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MAX_BODY_BYTES".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }
        Ok(self)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl FromEnv for IndexConfig {
    /// - VECTOR_DIMENSION: defaults to 1536
    /// - DEFAULT_TOP_K: defaults to 5
    /// - MAX_TOP_K: unset means no ceiling
    /// - MAX_BODY_BYTES: defaults to 16 MiB
    fn from_env() -> Result<Self, ConfigError> {
        Self {
            dimension: env_parse("VECTOR_DIMENSION", DEFAULT_DIMENSION)?,
            default_top_k: env_parse("DEFAULT_TOP_K", DEFAULT_TOP_K)?,
            max_top_k: env_parse_optional("MAX_TOP_K")?,
            max_body_bytes: env_parse("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        }
        .validate()
    }
}
