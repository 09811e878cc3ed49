use crate::error::{ErrorHandler, Propagate};
use crate::queue::Execution;
use std::fmt;
use std::rc::Rc;

/// Settings shared by every handle a `Dom` creates.
///
/// ```no_run
/// use domchain::{Config, Dom, Execution, LogAndContinue};
///
/// let config = Config::new()
///     .with_execution(Execution::Deferred)
///     .with_error_handler(LogAndContinue);
/// let dom = Dom::with_config(config).unwrap();
/// ```
#[derive(Clone)]
pub struct Config {
    execution: Execution,
    error_handler: Rc<dyn ErrorHandler>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            execution: Execution::default(),
            error_handler: Rc::new(Propagate),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("execution", &self.execution)
            .field("error_handler", &"..")
            .finish()
    }
}

impl Config {
    /// Immediate execution, errors propagated to the caller.
    #[inline]
    pub fn new() -> Config {
        Config::default()
    }

    /// Choose when chained operations run.
    pub fn with_execution(mut self, execution: Execution) -> Config {
        self.execution = execution;
        self
    }

    /// Choose what happens to failed operations.
    pub fn with_error_handler<H>(mut self, handler: H) -> Config
    where
        H: 'static + ErrorHandler,
    {
        self.error_handler = Rc::new(handler);
        self
    }

    #[inline]
    pub fn execution(&self) -> Execution {
        self.execution
    }

    #[inline]
    pub fn error_handler(&self) -> &Rc<dyn ErrorHandler> {
        &self.error_handler
    }
}
