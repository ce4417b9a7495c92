//! Configuration for oracle resolution.

/// Limits applied while resolving oracle text.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// How many table references may nest inside each other.
    pub max_depth: usize,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self { max_depth: 32 }
    }
}

impl OracleConfig {
    /// Set the maximum table nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        assert_eq!(OracleConfig::default().max_depth, 32);
    }

    #[test]
    fn builder_methods() {
        let cfg = OracleConfig::default().with_max_depth(4);
        assert_eq!(cfg.max_depth, 4);
    }
}
