use wasm_bindgen::JsValue;

/// Caller contract violations. Game-rule rejections are not errors; they travel inside
/// [`MoveResult`](crate::MoveResult).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("grid size must be between 1 and 65535 and fit in memory (got {size})")]
    InvalidGridSize { size: usize },

    #[error("cell ({x}, {y}) is outside the {grid_size}x{grid_size} grid")]
    InvalidCoordinate { x: usize, y: usize, grid_size: usize },

    #[error("unknown player index {index} (expected 0 or 1)")]
    UnknownPlayer { index: u8 },

    #[error("invalid engine config: {0}")]
    Config(String),
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

impl From<serde_wasm_bindgen::Error> for EngineError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        EngineError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_error_display() {
        let err = EngineError::InvalidCoordinate {
            x: 3,
            y: 0,
            grid_size: 3,
        };
        assert_eq!(err.to_string(), "cell (3, 0) is outside the 3x3 grid");
    }

    #[test]
    fn grid_size_error_display() {
        let err = EngineError::InvalidGridSize { size: 0 };
        assert_eq!(
            err.to_string(),
            "grid size must be between 1 and 65535 and fit in memory (got 0)"
        );
    }

    #[test]
    fn player_error_display() {
        let err = EngineError::UnknownPlayer { index: 7 };
        assert_eq!(err.to_string(), "unknown player index 7 (expected 0 or 1)");
    }
}
