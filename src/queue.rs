//! Sequencing of chained handle operations.
//!
//! Every handle owns a `ChainExecutor`. In `Execution::Immediate` mode an
//! operation runs as soon as it is chained, unless an earlier operation of the
//! same chain is suspended (waiting on a timer or an animation), in which case
//! it is queued behind it. In `Execution::Deferred` mode nothing runs until
//! `flush` is called.

use crate::error::{Error, ErrorHandler};
use crate::logging::{debug, error, trace, warn};
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::mem;
use std::rc::Rc;

/// When chained operations run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Execution {
    /// Run each operation as it is chained, in order behind any suspended one.
    Immediate,
    /// Queue operations until `Handle::flush` is awaited.
    Deferred,
}

impl Default for Execution {
    #[inline]
    fn default() -> Execution {
        Execution::Immediate
    }
}

/// What an operation did when it ran.
pub enum Step<E> {
    /// The operation completed synchronously.
    Done,
    /// The operation started something asynchronous. The rest of the chain
    /// waits for this future.
    Suspend(LocalBoxFuture<'static, Result<(), E>>),
}

impl<E: 'static> Step<E> {
    /// Suspend the chain on the given future.
    pub fn suspend<F>(future: F) -> Step<E>
    where
        F: 'static + Future<Output = Result<(), E>>,
    {
        Step::Suspend(Box::pin(future))
    }

    /// Convert the error type of a suspended step.
    pub fn map_err<G, F>(self, f: F) -> Step<G>
    where
        G: 'static,
        F: 'static + FnOnce(E) -> G,
    {
        match self {
            Step::Done => Step::Done,
            Step::Suspend(future) => Step::Suspend(Box::pin(async move { future.await.map_err(f) })),
        }
    }
}

impl<E> fmt::Debug for Step<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Step::Done => f.write_str("Done"),
            Step::Suspend(_) => f.write_str("Suspend(..)"),
        }
    }
}

/// A queued operation, already annotated with its context.
pub(crate) type Job = Box<dyn FnOnce() -> Result<Step<Error>, Error>>;

#[derive(Clone)]
pub(crate) struct ChainExecutor {
    inner: Rc<ExecutorInner>,
}

struct ExecutorInner {
    execution: Execution,
    handler: Rc<dyn ErrorHandler>,
    queue: RefCell<VecDeque<Job>>,
    // Only meaningful for `Execution::Immediate`: set while a drain task owns
    // the queue.
    suspended: Cell<bool>,
    waiters: RefCell<Vec<oneshot::Sender<Result<(), Error>>>>,
    // A propagated failure of a suspended chain that nobody was awaiting.
    failed: RefCell<Option<Error>>,
    // Only meaningful for `Execution::Deferred`: set while a flush pass runs.
    flushing: Cell<bool>,
    flush_waiters: RefCell<Vec<oneshot::Sender<()>>>,
}

impl fmt::Debug for ChainExecutor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ChainExecutor")
            .field("execution", &self.inner.execution)
            .field("queued", &self.inner.queue.borrow().len())
            .field("suspended", &self.inner.suspended.get())
            .field("flushing", &self.inner.flushing.get())
            .field("failed", &self.inner.failed.borrow().is_some())
            .finish()
    }
}

impl ChainExecutor {
    pub(crate) fn new(execution: Execution, handler: Rc<dyn ErrorHandler>) -> ChainExecutor {
        ChainExecutor {
            inner: Rc::new(ExecutorInner {
                execution,
                handler,
                queue: RefCell::new(VecDeque::new()),
                suspended: Cell::new(false),
                waiters: RefCell::new(Vec::new()),
                failed: RefCell::new(None),
                flushing: Cell::new(false),
                flush_waiters: RefCell::new(Vec::new()),
            }),
        }
    }

    #[inline]
    pub(crate) fn execution(&self) -> Execution {
        self.inner.execution
    }

    #[inline]
    pub(crate) fn handler(&self) -> &Rc<dyn ErrorHandler> {
        &self.inner.handler
    }

    /// Number of operations waiting to run.
    #[inline]
    pub(crate) fn pending(&self) -> usize {
        self.inner.queue.borrow().len()
    }

    /// Run `job` now, or queue it.
    ///
    /// The returned error has already been through the error handler: `Err`
    /// means the handler chose to propagate. If an earlier suspended step of
    /// this chain failed and nobody has observed it yet, that failure is
    /// returned instead and `job` is discarded.
    pub(crate) fn enqueue(&self, job: Job) -> Result<(), Error> {
        let inner = &self.inner;
        if let Some(e) = inner.take_failure() {
            warn!("ChainExecutor::enqueue: chain failed earlier: {}", e);
            return Err(e);
        }
        if inner.execution == Execution::Deferred || inner.suspended.get() {
            inner.queue.borrow_mut().push_back(job);
            trace!("ChainExecutor::enqueue: queued ({} pending)", self.pending());
            return Ok(());
        }

        match job() {
            Ok(Step::Done) => Ok(()),
            Ok(Step::Suspend(future)) => {
                debug!("ChainExecutor::enqueue: chain suspended");
                inner.suspended.set(true);
                spawn(drain(self.inner.clone(), future));
                Ok(())
            }
            Err(e) => inner.handler.handle(e),
        }
    }

    /// Run the operations queued at the time of the call, in order, once each.
    ///
    /// Operations queued while this pass runs are left for the next pass. A
    /// flush that is called while another pass is running waits for that
    /// pass to finish before it looks at the queue. In `Execution::Immediate`
    /// mode this waits for the chain to settle instead.
    pub(crate) async fn flush(&self) -> Result<(), Error> {
        if self.inner.execution == Execution::Immediate {
            return self.settled().await;
        }

        while self.inner.flushing.get() {
            let (sender, receiver) = oneshot::channel();
            self.inner.flush_waiters.borrow_mut().push(sender);
            trace!("ChainExecutor::flush: waiting for the running pass");
            let _ = receiver.await;
        }
        let _pass = FlushPass::start(&self.inner);

        let pass = mem::take(&mut *self.inner.queue.borrow_mut());
        debug!("ChainExecutor::flush: running {} queued operations", pass.len());

        let mut pass = pass.into_iter();
        while let Some(job) = pass.next() {
            match job() {
                Ok(Step::Done) => {}
                Ok(Step::Suspend(future)) => {
                    if let Err(e) = future.await {
                        self.absorb(e, pass.len())?;
                    }
                }
                Err(e) => self.absorb(e, pass.len())?,
            }
        }
        Ok(())
    }

    /// Resolves once no operation of this chain is suspended. Errors that the
    /// handler propagated out of a suspended chain are reported here, also
    /// when the chain failed before `settled` was called.
    pub(crate) fn settled(&self) -> impl Future<Output = Result<(), Error>> {
        let earlier = self.inner.take_failure();
        let receiver = if earlier.is_none() && self.inner.suspended.get() {
            let (sender, receiver) = oneshot::channel();
            self.inner.waiters.borrow_mut().push(sender);
            Some(receiver)
        } else {
            None
        };
        async move {
            if let Some(e) = earlier {
                return Err(e);
            }
            match receiver {
                None => Ok(()),
                Some(receiver) => receiver.await.unwrap_or(Ok(())),
            }
        }
    }

    fn absorb(&self, e: Error, remaining: usize) -> Result<(), Error> {
        self.inner.handler.handle(e).map_err(|e| {
            if remaining > 0 {
                warn!(
                    "ChainExecutor::flush: discarding {} queued operations after {}",
                    remaining,
                    e.context()
                );
            }
            e
        })
    }
}

impl ExecutorInner {
    fn settle(&self, outcome: Result<(), Error>) {
        self.suspended.set(false);
        let waiters = mem::take(&mut *self.waiters.borrow_mut());
        if let Err(e) = &outcome {
            if waiters.is_empty() {
                error!("chained operation failed with nobody awaiting it: {}", e);
                *self.failed.borrow_mut() = Some(e.clone());
            }
        }
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
    }

    #[inline]
    fn take_failure(&self) -> Option<Error> {
        self.failed.borrow_mut().take()
    }
}

/// Marks a deferred flush pass as running; wakes the flushes waiting behind
/// it when dropped, including when the pass is abandoned mid-way.
struct FlushPass<'a> {
    inner: &'a ExecutorInner,
}

impl<'a> FlushPass<'a> {
    fn start(inner: &'a ExecutorInner) -> FlushPass<'a> {
        inner.flushing.set(true);
        FlushPass { inner }
    }
}

impl Drop for FlushPass<'_> {
    fn drop(&mut self) {
        self.inner.flushing.set(false);
        let waiters = mem::take(&mut *self.inner.flush_waiters.borrow_mut());
        for waiter in waiters {
            let _ = waiter.send(());
        }
    }
}

/// Drive a suspended chain: wait for `first`, then run everything that was
/// queued behind it, suspending again as needed.
async fn drain(inner: Rc<ExecutorInner>, first: LocalBoxFuture<'static, Result<(), Error>>) {
    let mut current = Some(first);
    let outcome = loop {
        if let Some(future) = current.take() {
            if let Err(e) = future.await {
                if let Err(e) = inner.handler.handle(e) {
                    break Err(e);
                }
            }
        }

        let job = inner.queue.borrow_mut().pop_front();
        let job = match job {
            Some(job) => job,
            None => break Ok(()),
        };
        match job() {
            Ok(Step::Done) => {}
            Ok(Step::Suspend(future)) => current = Some(future),
            Err(e) => {
                if let Err(e) = inner.handler.handle(e) {
                    break Err(e);
                }
            }
        }
    };

    if outcome.is_err() {
        let discarded = inner.queue.borrow_mut().drain(..).count();
        if discarded > 0 {
            warn!("drain: discarding {} queued operations", discarded);
        }
    }
    debug!("drain: chain settled");
    inner.settle(outcome);
}

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        fn spawn<F>(future: F)
        where
            F: 'static + Future<Output = ()>,
        {
            wasm_bindgen_futures::spawn_local(future);
        }
    } else {
        use futures::executor::{LocalPool, LocalSpawner};
        use futures::task::LocalSpawnExt;

        thread_local! {
            static POOL: RefCell<LocalPool> = RefCell::new(LocalPool::new());
            static SPAWNER: LocalSpawner = POOL.with(|pool| pool.borrow().spawner());
        }

        fn spawn<F>(future: F)
        where
            F: 'static + Future<Output = ()>,
        {
            SPAWNER.with(|spawner| {
                if spawner.spawn_local(future).is_err() {
                    error!("spawn: local pool is shut down");
                }
            });
        }

        /// Run suspended chains on this thread until none can make progress.
        #[cfg(test)]
        pub(crate) fn run_until_stalled() {
            // The spawner borrows the pool when first created.
            SPAWNER.with(|_| ());
            POOL.with(|pool| pool.borrow_mut().run_until_stalled());
        }
    }
}
