use crate::config::BridgeConfig;
use crate::error::Result;
use crate::hid::{DeviceSource, ReportStream};
use crate::logger::{log, log_transition, Verbosity};
use crate::mapper::{self, PadSink};
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

pub const ABORT_KEY: char = 'q';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    Retry,
    Abort,
}

/// Blocking "device missing" prompt. Only shown on the very first search
/// and after a re-acquisition budget runs out.
pub trait Operator {
    fn device_missing_prompt(&mut self) -> PromptChoice;
}

pub struct ConsoleOperator;

impl Operator for ConsoleOperator {
    fn device_missing_prompt(&mut self) -> PromptChoice {
        println!(
            "No se encontró el mando físico. Enter para reintentar, '{}' + Enter para salir.",
            ABORT_KEY
        );
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).is_err() {
            return PromptChoice::Abort;
        }
        match line.trim().chars().next() {
            Some(c) if c.eq_ignore_ascii_case(&ABORT_KEY) => PromptChoice::Abort,
            _ => PromptChoice::Retry,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// Operator chose the abort key at a prompt. A clean exit.
    OperatorAbort,
    /// The stop flag was raised (tests; production only kills the process).
    Stopped,
}

/// Transient acquisition bookkeeping: whether any stream was ever opened
/// decides which search policy applies the next time the device is gone.
struct AcquisitionSession {
    first_search: bool,
}

enum Acquired<T> {
    Stream(T),
    Abort,
    Stopped,
}

/// Drives acquisition and mapping forever: the process's only long-running
/// activity. Returns only on operator abort, stop flag, or a fatal error
/// from the virtual-pad side.
pub fn run<S, O, P>(
    source: &mut S,
    operator: &mut O,
    pad: &mut P,
    config: &BridgeConfig,
    stop: &AtomicBool,
) -> Result<SessionEnd>
where
    S: DeviceSource,
    O: Operator,
    P: PadSink,
{
    let mut session = AcquisitionSession { first_search: true };

    loop {
        let stream = if session.first_search {
            search_with_prompt(source, operator, stop)?
        } else {
            search_reacquire(source, operator, config, stop)?
        };

        let mut stream = match stream {
            Acquired::Stream(s) => s,
            Acquired::Abort => return Ok(SessionEnd::OperatorAbort),
            Acquired::Stopped => return Ok(SessionEnd::Stopped),
        };

        session.first_search = false;
        log_transition("Searching", "Connected", "stream abierto, reenviando al pad virtual");

        match pump_reports(&mut stream, pad, stop)? {
            PumpEnd::StreamLost(reason) => {
                // Stream handle drops here before we go hunting again.
                log_transition("Connected", "Searching", &reason);
            }
            PumpEnd::Stopped => return Ok(SessionEnd::Stopped),
        }
    }
}

/// One poll, then hand the decision to the operator. Used for the first
/// ever search and as the fallback when re-acquisition gives up.
fn search_with_prompt<S, O>(
    source: &mut S,
    operator: &mut O,
    stop: &AtomicBool,
) -> Result<Acquired<S::Stream>>
where
    S: DeviceSource,
    O: Operator,
{
    loop {
        if stop.load(Ordering::SeqCst) {
            return Ok(Acquired::Stopped);
        }
        if let Some(stream) = poll_device(source) {
            return Ok(Acquired::Stream(stream));
        }
        if let PromptChoice::Abort = operator.device_missing_prompt() {
            return Ok(Acquired::Abort);
        }
    }
}

/// Silent timed re-polling after a previously working connection dropped.
/// Falls back to the prompt once the budget is exhausted.
fn search_reacquire<S, O>(
    source: &mut S,
    operator: &mut O,
    config: &BridgeConfig,
    stop: &AtomicBool,
) -> Result<Acquired<S::Stream>>
where
    S: DeviceSource,
    O: Operator,
{
    for attempt in 1..=config.max_reacquire_retries {
        if stop.load(Ordering::SeqCst) {
            return Ok(Acquired::Stopped);
        }
        if let Some(stream) = poll_device(source) {
            return Ok(Acquired::Stream(stream));
        }
        log(
            Verbosity::Medium,
            &format!("Reintento {}/{}", attempt, config.max_reacquire_retries),
        );
        thread::sleep(Duration::from_millis(config.reacquire_interval_ms));
    }

    search_with_prompt(source, operator, stop)
}

/// A poll that fails (enumeration hiccup, device grabbed by another
/// process) counts as "not there right now"; the retry policy above
/// decides what happens next, nothing propagates.
fn poll_device<S: DeviceSource>(source: &mut S) -> Option<S::Stream> {
    match source.try_open() {
        Ok(found) => found,
        Err(e) => {
            log(Verbosity::Low, &format!("Fallo al abrir el dispositivo: {}", e));
            None
        }
    }
}

enum PumpEnd {
    StreamLost(String),
    Stopped,
}

/// Connected state: one short-timeout blocking read at a time, strictly in
/// arrival order. A timeout tick is routine and does nothing; anything
/// else that fails the read sends us back to searching.
fn pump_reports<R, P>(stream: &mut R, pad: &mut P, stop: &AtomicBool) -> Result<PumpEnd>
where
    R: ReportStream,
    P: PadSink,
{
    let mut buf = vec![0u8; stream.buf_len()];

    loop {
        if stop.load(Ordering::SeqCst) {
            return Ok(PumpEnd::Stopped);
        }
        match stream.read_report(&mut buf) {
            Ok(0) => continue,
            Ok(n) => {
                // Short reports come back un-applied and are dropped
                // silently; the pad never sees a partial update.
                mapper::apply(&buf[..n], pad)?;
            }
            Err(e) => return Ok(PumpEnd::StreamLost(e.to_string())),
        }
    }
}
