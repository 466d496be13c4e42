//! Error types for the dependency injection container.

use std::fmt;

/// Boxed error returned by user constructors and lifecycle hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type returned by component constructors and lifecycle hooks.
///
/// Constructors may fail with any error; [`DiError`] converts into it through `?`,
/// so argument lookups can be propagated directly:
///
/// ```rust
/// use ferrous_inject::{Arguments, ComponentResult};
///
/// fn port(args: &Arguments) -> ComponentResult<u16> {
///     let base = args.get::<u16>("base")?;
///     Ok(*base + 1)
/// }
/// ```
pub type ComponentResult<T> = Result<T, BoxError>;

/// Lifecycle pass in which a hook failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Forward pass, run in creation order before the program body.
    PostInit,
    /// Reverse pass, run in reverse creation order after the program body.
    PreDestroy,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecyclePhase::PostInit => f.write_str("post_init"),
            LifecyclePhase::PreDestroy => f.write_str("pre_destroy"),
        }
    }
}

/// Dependency injection errors
///
/// Every variant is fatal at the point it is raised: the container never retries
/// or substitutes a fallback component.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{ComponentCollection, DiError, Resolver};
///
/// let container = ComponentCollection::new().build();
/// match container.get::<String>() {
///     Err(DiError::NotFound { type_name, name }) => {
///         assert_eq!(type_name.as_deref(), Some("alloc::string::String"));
///         assert!(name.is_none());
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DiError {
    /// Programmer misuse: a request with neither type nor name, a malformed
    /// descriptor or an invalid injection override.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A second descriptor tried to register under an already used name.
    #[error("Duplicate component name: {0}")]
    DuplicateName(String),

    /// No eligible descriptor matched the request.
    #[error("No component found for {}", describe_request(.type_name.as_deref(), .name.as_deref()))]
    NotFound {
        type_name: Option<String>,
        name: Option<String>,
    },

    /// More than one eligible descriptor remained after all narrowing.
    #[error("Ambiguous component for {requested}: candidates {}", .candidates.join(", "))]
    Ambiguous {
        requested: String,
        candidates: Vec<String>,
    },

    /// Circular dependency detected (includes path)
    #[error("Circular dependency: {}", .0.join(" -> "))]
    Circular(Vec<String>),

    /// Maximum recursion depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),

    /// The resolved component cannot be viewed as the requested type.
    #[error("Type mismatch: component {component} does not provide {expected}")]
    TypeMismatch {
        expected: &'static str,
        component: String,
    },

    /// A constructor returned an error; the component stays unconstructed.
    #[error("Failed to construct {component}: {source}")]
    Construction {
        component: String,
        #[source]
        source: BoxError,
    },

    /// A lifecycle hook returned an error; the remaining hooks of the pass were skipped.
    #[error("{phase} hook of {component} failed: {source}")]
    Lifecycle {
        component: String,
        phase: LifecyclePhase,
        #[source]
        source: BoxError,
    },
}

impl DiError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        DiError::Configuration(message.into())
    }

    pub(crate) fn not_found(type_name: Option<&str>, name: Option<&str>) -> Self {
        DiError::NotFound {
            type_name: type_name.map(str::to_owned),
            name: name.map(str::to_owned),
        }
    }

    /// Returns `true` for errors caused by the registration or request shape
    /// rather than by a failing constructor or hook.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DiError::Configuration(_) | DiError::DuplicateName(_)
        )
    }
}

pub(crate) fn describe_request(type_name: Option<&str>, name: Option<&str>) -> String {
    match (type_name, name) {
        (Some(t), Some(n)) => format!("type {} with name '{}'", t, n),
        (Some(t), None) => format!("type {}", t),
        (None, Some(n)) => format!("name '{}'", n),
        (None, None) => "an empty request".to_string(),
    }
}

/// Result type for DI operations
pub type DiResult<T> = Result<T, DiError>;
