//! Asynchronous delivery pipeline
//!
//! Any number of producers push records into an unbounded queue; exactly one
//! worker thread drains it, rendering each record for every sink in
//! registration order. Delivery order is the global enqueue order.

use super::error::{LoggerError, Result};
use super::metrics::LoggerMetrics;
use super::record::Record;
use super::sink::{deliver, flush_all, Sink};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use parking_lot::RwLock;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default shutdown timeout used when a dispatcher is dropped (5 seconds)
///
/// For an unbounded wait use [`Dispatcher::stop`]; for a custom bound use
/// [`Dispatcher::shutdown`].
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

const WORKER_THREAD_NAME: &str = "colorful-logger-worker";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Stopped,
    Running,
    Draining,
}

enum Message {
    Record(Box<Record>),
    Attach(Sink),
    Flush(Sender<()>),
    Stop,
}

struct Inner {
    state: DispatcherState,
    sender: Option<Sender<Message>>,
    worker: Option<JoinHandle<Vec<Sink>>>,
    /// Sinks held while no worker owns them
    idle_sinks: Vec<Sink>,
    /// Signalled once a drain has finished and the sinks are idle again
    drain_waiters: Vec<Sender<()>>,
}

/// Single-consumer, multi-producer record queue
///
/// # Example
///
/// ```
/// use colorful_logger::prelude::*;
///
/// let dispatcher = Dispatcher::new(vec![Sink::new(
///     ConsoleAppender::stderr(),
///     FormatterConfig::new(RenderMode::Console),
/// )]);
/// dispatcher.start()?;
/// dispatcher.enqueue(Record::new(Severity::Info, "root", "ready".into(), Fields::new()));
/// dispatcher.stop();
/// # Ok::<(), colorful_logger::LoggerError>(())
/// ```
pub struct Dispatcher {
    inner: RwLock<Inner>,
    metrics: Arc<LoggerMetrics>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(sinks: Vec<Sink>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                state: DispatcherState::Stopped,
                sender: None,
                worker: None,
                idle_sinks: sinks,
                drain_waiters: Vec::new(),
            }),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    pub fn state(&self) -> DispatcherState {
        self.inner.read().state
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Register another sink after the existing ones
    ///
    /// While running, the sink travels through the queue so that it receives
    /// exactly the records enqueued after this call.
    pub fn add_sink(&self, sink: Sink) {
        let mut inner = self.inner.write();
        match (inner.state, inner.sender.as_ref()) {
            (DispatcherState::Running, Some(sender)) => {
                if let Err(err) = sender.send(Message::Attach(sink)) {
                    if let Message::Attach(sink) = err.into_inner() {
                        inner.idle_sinks.push(sink);
                    }
                }
            }
            _ => inner.idle_sinks.push(sink),
        }
    }

    /// Spawn the worker; no-op unless stopped
    pub fn start(&self) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.state != DispatcherState::Stopped {
            return Ok(());
        }

        let (sender, receiver) = unbounded();
        let sinks = std::mem::take(&mut inner.idle_sinks);
        let metrics = Arc::clone(&self.metrics);

        let spawned = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || Self::run(receiver, sinks, metrics));

        let handle = spawned.map_err(LoggerError::WorkerSpawn)?;
        inner.sender = Some(sender);
        inner.worker = Some(handle);
        inner.state = DispatcherState::Running;
        Ok(())
    }

    /// Queue a record for delivery without blocking
    ///
    /// Records offered while the dispatcher is not running are dropped and
    /// counted in [`LoggerMetrics::dropped_count`].
    pub fn enqueue(&self, record: Record) {
        let inner = self.inner.read();
        let accepted = match (inner.state, inner.sender.as_ref()) {
            (DispatcherState::Running, Some(sender)) => {
                sender.send(Message::Record(Box::new(record))).is_ok()
            }
            _ => false,
        };
        if !accepted {
            self.metrics.record_dropped();
        }
    }

    /// Block until every record queued so far is written and all sinks flushed
    ///
    /// During a concurrent drain this waits for the drain to finish.
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = bounded(1);
        {
            let mut inner = self.inner.write();
            match (inner.state, inner.sender.clone()) {
                (DispatcherState::Running, Some(sender)) => {
                    if sender.send(Message::Flush(ack_tx)).is_err() {
                        return;
                    }
                }
                (DispatcherState::Draining, _) => inner.drain_waiters.push(ack_tx),
                _ => {
                    flush_all(&mut inner.idle_sinks);
                    return;
                }
            }
        }
        // Err means the worker went away; nothing left to wait for.
        let _ = ack_rx.recv();
    }

    /// Queue a record, or write it in-line when the dispatcher is stopped
    ///
    /// Unlike [`enqueue`](Self::enqueue) the record is never dropped for
    /// lifecycle reasons: a running drain is awaited first. Used for FATAL
    /// records, which must reach the sinks before the process exits.
    pub fn enqueue_or_write(&self, record: Record) {
        self.wait_for_drain();

        let mut inner = self.inner.write();
        match (inner.state, inner.sender.clone()) {
            (DispatcherState::Running, Some(sender)) => {
                if let Err(err) = sender.send(Message::Record(Box::new(record))) {
                    if let Message::Record(record) = err.into_inner() {
                        deliver(&mut inner.idle_sinks, &record, &self.metrics);
                    }
                }
            }
            (DispatcherState::Stopped, _) => {
                deliver(&mut inner.idle_sinks, &record, &self.metrics);
                flush_all(&mut inner.idle_sinks);
            }
            // another drain started after the wait; its sinks are out of reach
            _ => {
                self.metrics.record_dropped();
            }
        }
    }

    fn wait_for_drain(&self) {
        let waiter = {
            let mut inner = self.inner.write();
            if inner.state != DispatcherState::Draining {
                return;
            }
            let (tx, rx) = bounded(1);
            inner.drain_waiters.push(tx);
            rx
        };
        let _ = waiter.recv();
    }

    /// Drain the queue and stop the worker, waiting as long as it takes
    ///
    /// Calling `stop` on a stopped dispatcher does nothing.
    pub fn stop(&self) {
        self.drain(None);
    }

    /// Like [`stop`](Self::stop) with a bounded wait
    ///
    /// Returns `false` when the worker did not finish within `timeout`; the
    /// worker is then detached and its sinks are not returned.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        self.drain(Some(timeout))
    }

    fn drain(&self, timeout: Option<Duration>) -> bool {
        let (sender, worker) = {
            let mut inner = self.inner.write();
            if inner.state != DispatcherState::Running {
                return true;
            }
            inner.state = DispatcherState::Draining;
            (inner.sender.clone(), inner.worker.take())
        };

        if let Some(sender) = sender {
            // Err only if the worker already exited; join below handles it.
            let _ = sender.send(Message::Stop);
        }

        let sinks = match worker {
            Some(handle) => match Self::join(handle, timeout) {
                Some(sinks) => sinks,
                None => {
                    self.finish_drain(Vec::new());
                    return false;
                }
            },
            None => Vec::new(),
        };

        self.finish_drain(sinks);
        true
    }

    fn join(handle: JoinHandle<Vec<Sink>>, timeout: Option<Duration>) -> Option<Vec<Sink>> {
        if let Some(timeout) = timeout {
            let start = Instant::now();
            while !handle.is_finished() {
                if start.elapsed() >= timeout {
                    eprintln!(
                        "[LOGGER WARNING] Dispatcher worker did not finish within {:?} timeout. \
                         Some logs may be lost.",
                        timeout
                    );
                    return None;
                }
                // Small sleep to avoid busy-waiting
                thread::sleep(Duration::from_millis(10));
            }
        }

        match handle.join() {
            Ok(sinks) => Some(sinks),
            Err(e) => {
                eprintln!("[LOGGER ERROR] Dispatcher worker panicked during shutdown: {:?}", e);
                Some(Vec::new())
            }
        }
    }

    fn finish_drain(&self, mut sinks: Vec<Sink>) {
        let mut inner = self.inner.write();
        // Sinks registered while draining come after the worker's ones.
        sinks.append(&mut inner.idle_sinks);
        inner.idle_sinks = sinks;
        inner.sender = None;
        inner.state = DispatcherState::Stopped;
        for waiter in inner.drain_waiters.drain(..) {
            let _ = waiter.send(());
        }
    }

    fn run(receiver: Receiver<Message>, mut sinks: Vec<Sink>, metrics: Arc<LoggerMetrics>) -> Vec<Sink> {
        while let Ok(message) = receiver.recv() {
            match message {
                Message::Record(record) => {
                    deliver(&mut sinks, &record, &metrics);
                    if receiver.is_empty() {
                        flush_all(&mut sinks);
                    }
                }
                Message::Attach(sink) => sinks.push(sink),
                Message::Flush(ack) => {
                    flush_all(&mut sinks);
                    let _ = ack.send(());
                }
                Message::Stop => break,
            }
        }

        flush_all(&mut sinks);
        sinks
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Dispatcher shutting down with {} dropped records (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}
