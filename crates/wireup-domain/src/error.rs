//! Error handling types

use crate::value_objects::DependencyKey;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error used as the optional cause of wrapped failures
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for wireup
#[derive(Error, Debug)]
pub enum Error {
    /// A qualified lookup has no matching binding.
    ///
    /// Qualified keys never fall back to an implicit self-binding.
    #[error("No binding registered for named dependency {key}")]
    UnresolvedNamedBinding {
        /// The qualified key that was requested
        key: String,
    },

    /// The construction plan revisits a key already being constructed
    #[error("Cyclic dependency detected: {path}")]
    CyclicDependency {
        /// The dependency chain, from the first occurrence back to itself
        path: String,
    },

    /// The dependency graph is deeper than the configured limit
    #[error("Resolution depth limit of {limit} exceeded while resolving {key}")]
    ResolutionDepthExceeded {
        /// The key being resolved when the limit was hit
        key: String,
        /// The configured limit
        limit: usize,
    },

    /// A concrete type could not be built
    #[error("Failed to construct {type_name}: {message}")]
    Construction {
        /// The type whose construction failed
        type_name: String,
        /// Description of the failure
        message: String,
        /// The failure of a transitive dependency, if any
        #[source]
        source: Option<BoxedError>,
    },

    /// Invalid module, provider or runtime configuration
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedError>,
    },

    /// File system error while loading or saving configuration
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedError>,
    },

    /// A lazy provider handle outlived the injector that created it
    #[error("Injector dropped before deferred dependency {type_name} was requested")]
    EngineDropped {
        /// The type the handle was created for
        type_name: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create an unresolved named binding error for `key`
    pub fn unresolved_named(key: &DependencyKey) -> Self {
        Self::UnresolvedNamedBinding {
            key: key.to_string(),
        }
    }

    /// Create a cyclic dependency error from the offending chain
    pub fn cyclic<S: Into<String>>(path: S) -> Self {
        Self::CyclicDependency { path: path.into() }
    }

    /// Create a depth limit error
    pub fn depth_exceeded(key: &DependencyKey, limit: usize) -> Self {
        Self::ResolutionDepthExceeded {
            key: key.to_string(),
            limit,
        }
    }
}

// Construction error creation methods
impl Error {
    /// Create a construction error
    pub fn construction<T: Into<String>, M: Into<String>>(type_name: T, message: M) -> Self {
        Self::Construction {
            type_name: type_name.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a construction error with source
    pub fn construction_with_source<
        T: Into<String>,
        M: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        type_name: T,
        message: M,
        source: E,
    ) -> Self {
        Self::Construction {
            type_name: type_name.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wrap the failure of parameter `param` (requested as `key`) while
    /// building `type_name`
    pub fn dependency<T: Into<String>>(
        type_name: T,
        param: &str,
        key: &DependencyKey,
        source: Error,
    ) -> Self {
        Self::Construction {
            type_name: type_name.into(),
            message: format!("cannot resolve parameter `{param}` ({key})"),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Inspection helpers
impl Error {
    /// Walk construction wrappers down to the error that started the failure.
    ///
    /// Nested dependencies wrap their failures with the parameter being
    /// resolved; this returns the innermost wireup error.
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Error::Construction {
            source: Some(source),
            ..
        } = current
        {
            match source.downcast_ref::<Error>() {
                Some(inner) => current = inner,
                None => break,
            }
        }
        current
    }

    /// Whether the root cause is an unresolved named binding
    pub fn is_unresolved_named(&self) -> bool {
        matches!(self.root_cause(), Error::UnresolvedNamedBinding { .. })
    }

    /// Whether the root cause is a dependency cycle
    pub fn is_cyclic(&self) -> bool {
        matches!(self.root_cause(), Error::CyclicDependency { .. })
    }
}
