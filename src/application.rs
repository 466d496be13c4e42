//! Application bootstrap.
//!
//! The root application is an ordinary component registered under
//! `dyn Application` (or `dyn AsyncApplication`). Bootstrapping resolves it,
//! which builds its dependency graph, runs the `post_init` pass, calls `run`
//! once, and finishes with the `pre_destroy` pass.

use std::process::ExitCode;

use async_trait::async_trait;

use crate::error::DiResult;
use crate::traits::Resolver;
use crate::Container;

/// Root of a synchronous program.
pub trait Application: Send + Sync + 'static {
    /// Program body; the return value becomes the process exit status.
    fn run(&self) -> i32;
}

/// Root of an asynchronous program.
///
/// Component resolution stays synchronous; only the body is awaited.
#[async_trait]
pub trait AsyncApplication: Send + Sync + 'static {
    /// Program body; the return value becomes the process exit status.
    async fn run(&self) -> i32;
}

/// Resolves `dyn Application`, brackets its `run` with the lifecycle passes
/// and returns its exit status.
///
/// # Examples
///
/// ```
/// use ferrous_inject::{run_application, Application, ComponentCollection, ComponentDef};
/// use std::sync::Arc;
///
/// struct Hello;
/// impl Application for Hello {
///     fn run(&self) -> i32 {
///         0
///     }
/// }
///
/// let mut components = ComponentCollection::new();
/// components
///     .register(
///         ComponentDef::function(|_| Ok(Hello))
///             .named("app")
///             .provides::<dyn Application, _>(|a| a as Arc<dyn Application>),
///     )
///     .unwrap();
///
/// assert_eq!(run_application(&components.build()).unwrap(), 0);
/// ```
pub fn run_application(container: &Container) -> DiResult<i32> {
    let app = container.get::<dyn Application>()?;
    container.post_init()?;

    tracing::info!("running application");
    let code = app.run();
    tracing::info!(code, "application finished");

    container.pre_destroy()?;
    Ok(code)
}

/// Asynchronous counterpart of [`run_application`] for `dyn AsyncApplication`.
pub async fn run_async_application(container: &Container) -> DiResult<i32> {
    let app = container.get::<dyn AsyncApplication>()?;
    container.post_init()?;

    tracing::info!("running application");
    let code = app.run().await;
    tracing::info!(code, "application finished");

    container.pre_destroy()?;
    Ok(code)
}

/// Maps a bootstrap outcome to a process exit status.
///
/// Codes outside `0..=255` and every error map to `1`. Errors are logged.
pub fn exit_code(result: &DiResult<i32>) -> u8 {
    match result {
        Ok(code) => u8::try_from(*code).unwrap_or(1),
        Err(error) => {
            tracing::error!(%error, "application bootstrap failed");
            1
        }
    }
}

/// Runs the application and converts the outcome for `main`.
///
/// ```no_run
/// use ferrous_inject::{launch, ComponentCollection};
/// use std::process::ExitCode;
///
/// fn main() -> ExitCode {
///     let components = ComponentCollection::new();
///     // ... register components, including one providing `dyn Application` ...
///     launch(&components.build())
/// }
/// ```
pub fn launch(container: &Container) -> ExitCode {
    ExitCode::from(exit_code(&run_application(container)))
}
