#![forbid(unsafe_code)]

//! The update thread and its dispatcher.
//!
//! [`UpdateThread::spawn`] starts one named thread, runs the caller's init
//! closure on it to build the message handler, then feeds every posted
//! message to that handler in posting order. Nothing else ever touches the
//! state the handler owns.
//!
//! # Shutdown
//!
//! - The handler returns [`Flow::Stop`]: the loop exits after that message.
//! - [`UpdateThread::shutdown`] (or drop): a shutdown marker is queued
//!   behind everything already posted, then the thread is joined.
//! - Every [`Dispatcher`] and the thread handle are gone: the channel
//!   disconnects and the loop exits.
//!
//! After the loop exits, [`Dispatcher::post`] returns `false`.

use std::io;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

const THREAD_NAME: &str = "wheelpick-update";

/// What the update loop does after a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

enum Envelope<M> {
    Message(M),
    Shutdown,
}

/// Posts messages onto an update thread.
pub struct Dispatcher<M> {
    sender: mpsc::Sender<Envelope<M>>,
}

impl<M> Clone for Dispatcher<M> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<M> std::fmt::Debug for Dispatcher<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl<M> Dispatcher<M> {
    /// Queue `msg`. Returns `false` once the update loop has exited.
    pub fn post(&self, msg: M) -> bool {
        self.sender.send(Envelope::Message(msg)).is_ok()
    }
}

/// Handle to a running update thread.
pub struct UpdateThread<M: Send + 'static> {
    dispatcher: Dispatcher<M>,
    handle: Option<JoinHandle<()>>,
}

impl<M: Send + 'static> UpdateThread<M> {
    /// Start the update thread.
    ///
    /// `init` runs on the new thread with a dispatcher for posting back to
    /// it (e.g. from a simulated host) and returns the message handler.
    pub fn spawn<I, H>(init: I) -> io::Result<Self>
    where
        I: FnOnce(Dispatcher<M>) -> H + Send + 'static,
        H: FnMut(M) -> Flow + 'static,
    {
        let (tx, rx) = mpsc::channel::<Envelope<M>>();
        let dispatcher = Dispatcher { sender: tx };
        let loopback = dispatcher.clone();
        let handle = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || {
                let handler = init(loopback);
                update_loop(rx, handler);
            })?;
        tracing::debug!(message = "runtime.update_thread", action = "spawn");
        Ok(Self {
            dispatcher,
            handle: Some(handle),
        })
    }

    /// A new dispatcher for this thread.
    #[must_use]
    pub fn dispatcher(&self) -> Dispatcher<M> {
        self.dispatcher.clone()
    }

    /// Post through the thread's own dispatcher.
    pub fn post(&self, msg: M) -> bool {
        self.dispatcher.post(msg)
    }

    /// Wait for the handler to return [`Flow::Stop`] without asking it to.
    ///
    /// Returns `false` if the update thread panicked.
    pub fn join(mut self) -> bool {
        self.handle.take().is_none_or(|handle| handle.join().is_ok())
    }

    /// Process everything already posted, then stop and join.
    ///
    /// Returns `false` if the update thread panicked.
    pub fn shutdown(mut self) -> bool {
        let _ = self.dispatcher.sender.send(Envelope::Shutdown);
        self.handle.take().is_none_or(|handle| handle.join().is_ok())
    }
}

impl<M: Send + 'static> Drop for UpdateThread<M> {
    fn drop(&mut self) {
        let _ = self.dispatcher.sender.send(Envelope::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn update_loop<M, H>(rx: mpsc::Receiver<Envelope<M>>, mut handler: H)
where
    H: FnMut(M) -> Flow,
{
    let mut processed: u64 = 0;
    while let Ok(envelope) = rx.recv() {
        let Envelope::Message(msg) = envelope else {
            break;
        };
        processed += 1;
        if handler(msg) == Flow::Stop {
            break;
        }
    }
    tracing::debug!(
        message = "runtime.update_thread",
        action = "exit",
        processed
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn messages_arrive_in_order() {
        let (out_tx, out_rx) = mpsc::channel();
        let thread = UpdateThread::spawn(move |_| {
            move |n: u32| {
                out_tx.send(n).expect("collector alive");
                Flow::Continue
            }
        })
        .expect("spawn update thread");
        for n in 0..5 {
            assert!(thread.post(n));
        }
        assert!(thread.shutdown());
        let seen: Vec<_> = out_rx.try_iter().collect();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn stop_ends_the_loop() {
        let thread = UpdateThread::spawn(|_| |n: u32| if n == 2 { Flow::Stop } else { Flow::Continue })
            .expect("spawn update thread");
        let dispatcher = thread.dispatcher();
        for n in 0..3 {
            dispatcher.post(n);
        }
        assert!(thread.join());
        assert!(!dispatcher.post(9));
    }

    #[test]
    fn thread_is_named() {
        let (out_tx, out_rx) = mpsc::channel();
        let thread = UpdateThread::spawn(move |_| {
            move |(): ()| {
                let name = thread::current().name().map(str::to_owned);
                out_tx.send(name).expect("collector alive");
                Flow::Stop
            }
        })
        .expect("spawn update thread");
        thread.post(());
        let name = out_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("handler ran");
        assert_eq!(name.as_deref(), Some(THREAD_NAME));
        assert!(thread.join());
    }

    #[test]
    fn loopback_dispatcher_reaches_same_thread() {
        let (out_tx, out_rx) = mpsc::channel();
        let thread = UpdateThread::spawn(move |loopback: Dispatcher<u32>| {
            move |n: u32| {
                out_tx.send(n).expect("collector alive");
                if n < 3 {
                    loopback.post(n + 1);
                    Flow::Continue
                } else {
                    Flow::Stop
                }
            }
        })
        .expect("spawn update thread");
        thread.post(0);
        assert!(thread.join());
        let seen: Vec<_> = out_rx.try_iter().collect();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }
}
