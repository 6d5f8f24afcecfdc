//! Error types for the scene host and its utilities.

use thiserror::Error;

use crate::scene::Entity;

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// A second instance was bound while the singleton slot was already assigned.
    #[error("singleton `{type_name}` already instantiated")]
    AlreadyBound { type_name: &'static str },

    /// A singleton was released before the application signalled shutdown.
    #[error(
        "attempted to destroy singleton `{type_name}` before application shutdown; \
         a singleton must live until the application quits"
    )]
    PrematureTeardown { type_name: &'static str },

    /// The singleton was requested again while its own construction was still running.
    #[error("singleton `{type_name}` requested while it is being constructed")]
    SingletonUnderConstruction { type_name: &'static str },

    /// The entity was destroyed or never existed.
    #[error("entity {0:?} is not alive")]
    DeadEntity(Entity),

    /// The scene name is not registered in the scene catalog.
    #[error("unknown scene: '{0}'")]
    UnknownScene(String),

    /// A component required by another component is missing from the object.
    #[error("{required} requires a {missing} on the same object")]
    MissingComponent {
        required: &'static str,
        missing: &'static str,
    },

    /// An argument or serialized field holds an unusable value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Deferred destruction is only available while playing.
    #[error("destroy may not be called in edit mode, use destroy_immediate instead")]
    DestroyInEditMode,

    /// Persistent objects can only live at the root of the persistent scene.
    #[error("persistent object {0:?} cannot be parented under a scene object")]
    PersistentReparent(Entity),

    /// Configuration errors
    #[error("config error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Whether the error signals a lifecycle defect the host must not recover from.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::PrematureTeardown { .. })
    }
}

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premature_teardown_is_fatal() {
        let err = Error::PrematureTeardown { type_name: "Audio" };
        assert!(err.is_fatal());
        assert!(err.to_string().contains("Audio"));
    }

    #[test]
    fn already_bound_is_recoverable() {
        let err = Error::AlreadyBound { type_name: "Audio" };
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "singleton `Audio` already instantiated");
    }
}
