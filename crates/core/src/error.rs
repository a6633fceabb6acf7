//! Error types for the metaball core.

use thiserror::Error;

/// Errors produced while configuring or constructing the simulation.
///
/// All of these surface during setup. The per-tick operations
/// (`update`, packing, upload, draw) have no error path.
#[derive(Debug, Error)]
pub enum MetaballError {
    /// Width or height was zero or above the GL viewport limit.
    #[error(
        "invalid dimensions: width and height must be between 1 and {}",
        crate::viewport::MAX_DIMENSION
    )]
    InvalidDimensions,

    /// A field source was given a radius, position, or velocity it cannot hold.
    #[error("invalid source parameter '{parameter}': {value}")]
    InvalidSourceParameter { parameter: &'static str, value: f32 },

    /// The source population is empty or larger than the shader can address.
    #[error("invalid source count {count}: must be between 1 and {max}")]
    InvalidSourceCount { count: usize, max: usize },

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Writing an output artifact failed.
    #[error("I/O error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = MetaballError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_source_parameter_names_parameter_and_value() {
        let err = MetaballError::InvalidSourceParameter {
            parameter: "radius",
            value: -2.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("radius"), "missing parameter in: {msg}");
        assert!(msg.contains("-2.5"), "missing value in: {msg}");
    }

    #[test]
    fn invalid_source_count_includes_bounds() {
        let err = MetaballError::InvalidSourceCount { count: 500, max: 224 };
        let msg = err.to_string();
        assert!(msg.contains("500"), "missing count in: {msg}");
        assert!(msg.contains("224"), "missing max in: {msg}");
    }

    #[test]
    fn io_error_includes_message() {
        let msg = MetaballError::Io("disk full".into()).to_string();
        assert!(msg.contains("disk full"), "missing message in: {msg}");
    }

    #[test]
    fn metaball_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MetaballError>();
    }
}
