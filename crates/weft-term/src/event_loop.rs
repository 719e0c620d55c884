// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop: the synchronous input/paint cycle behind every weft app.
//
// Stdin is read on a background thread that forwards raw byte chunks over a
// channel. The loop blocks on that channel, decodes the bytes, hands every
// event to the application one at a time, and then repaints the frame once
// before blocking again. Nothing in the application runs concurrently with
// anything else: there is exactly one event in flight.
//
// # Escape timeout
//
// The channel wait uses a short timeout. When it expires with bytes still
// pending in the parser (a lone ESC), the parser is flushed and the ESC is
// delivered as the Escape key. Multi-byte sequences that arrive within the
// timeout, like shift-tab, are decoded whole.
//
// # Resize
//
// A SIGWINCH handler sets an atomic flag. The loop checks it after every
// wakeup, resizes the frame, forces a full redraw and delivers
// `Event::Resize` to the application.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, trace};

use crate::buffer::FrameBuffer;
use crate::input::{Event, Parser};
use crate::screen::Screen;
use crate::terminal::Terminal;

// ─── SIGWINCH ────────────────────────────────────────────────────────────────

static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_sigwinch_handler() {}

// ─── App ─────────────────────────────────────────────────────────────────────

/// What the application wants after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// An application driven by [`EventLoop`].
pub trait App {
    /// Handle one decoded event. Resizes arrive here as [`Event::Resize`].
    fn on_event(&mut self, event: &Event) -> Action;

    /// Paint the whole application into a cleared frame.
    fn paint(&mut self, frame: &mut FrameBuffer);

    /// Where the hardware cursor should be after painting, if visible.
    fn cursor(&self) -> Option<(u16, u16)> {
        None
    }
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// Event loop timing.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    /// How long input must be quiet before a pending ESC becomes the
    /// Escape key.
    pub escape_timeout: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            escape_timeout: Duration::from_millis(25),
        }
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// Owns the terminal and drives an [`App`] until it quits.
pub struct EventLoop {
    terminal: Terminal,
    parser: Parser,
    screen: Screen,
    config: LoopConfig,
}

impl EventLoop {
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn new() -> io::Result<Self> {
        Self::with_config(LoopConfig::default())
    }

    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn with_config(config: LoopConfig) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new()?,
            parser: Parser::new(),
            screen: Screen::new(),
            config,
        })
    }

    /// Run `app` until it returns [`Action::Quit`] or stdin closes.
    ///
    /// The terminal is restored on every exit path.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup, teardown or output fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        install_sigwinch_handler();

        let (mut reader, rx) = StdinReader::spawn()?;
        let result = self.run_inner(app, &rx);
        reader.stop();
        self.terminal.leave()?;
        result
    }

    fn run_inner(&mut self, app: &mut impl App, rx: &Receiver<Vec<u8>>) -> io::Result<()> {
        let size = self.terminal.size();
        let mut frame = FrameBuffer::new(size.cols, size.rows);
        self.repaint(app, &mut frame)?;

        loop {
            let events = match rx.recv_timeout(self.config.escape_timeout) {
                Ok(bytes) => self.parser.advance(&bytes),
                Err(RecvTimeoutError::Timeout) if self.parser.has_pending() => self.parser.flush(),
                Err(RecvTimeoutError::Timeout) => Vec::new(),
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("stdin closed");
                    return Ok(());
                }
            };

            let mut dirty = !events.is_empty();
            for event in &events {
                trace!(?event, "dispatch");
                if app.on_event(event) == Action::Quit {
                    return Ok(());
                }
            }

            if SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed) {
                let size = self.terminal.refresh_size();
                frame.resize(size.cols, size.rows);
                self.screen.force_redraw();
                if app.on_event(&Event::Resize(size)) == Action::Quit {
                    return Ok(());
                }
                dirty = true;
            }

            if dirty {
                self.repaint(app, &mut frame)?;
            }
        }
    }

    fn repaint(&mut self, app: &mut impl App, frame: &mut FrameBuffer) -> io::Result<()> {
        frame.clear();
        app.paint(frame);
        let cells = self.screen.render(frame, app.cursor());
        trace!(cells, "frame rendered");
        self.screen.flush()
    }
}

// ─── Stdin reader ────────────────────────────────────────────────────────────

/// Background thread forwarding stdin byte chunks.
///
/// On unix the thread polls with a short timeout so `stop` never waits on a
/// blocked `read`.
struct StdinReader {
    handle: Option<JoinHandle<()>>,
    stop: Arc<AtomicBool>,
}

impl StdinReader {
    fn spawn() -> io::Result<(Self, Receiver<Vec<u8>>)> {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || read_loop(&tx, &flag))?;
        Ok((
            Self {
                handle: Some(handle),
                stop,
            },
            rx,
        ))
    }

    fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for StdinReader {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(unix)]
fn read_loop(tx: &Sender<Vec<u8>>, stop: &AtomicBool) {
    const POLL_TIMEOUT_MS: i32 = 50;
    let fd = libc::STDIN_FILENO;
    let mut buf = [0u8; 4096];

    while !stop.load(Ordering::Relaxed) {
        let mut pfd = libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        };
        if unsafe { libc::poll(&raw mut pfd, 1, POLL_TIMEOUT_MS) } <= 0 {
            continue;
        }
        let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
        let Ok(n) = usize::try_from(n) else { break };
        if n == 0 || tx.send(buf[..n].to_vec()).is_err() {
            break;
        }
    }
}

#[cfg(not(unix))]
fn read_loop(tx: &Sender<Vec<u8>>, stop: &AtomicBool) {
    use std::io::Read;
    let mut buf = [0u8; 4096];
    while !stop.load(Ordering::Relaxed) {
        match io::stdin().lock().read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                if tx.send(buf[..n].to_vec()).is_err() {
                    break;
                }
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
