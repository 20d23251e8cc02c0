//! Adapter runtime
//!
//! Bridges line I/O and the countdown clock to one session. A reader task and
//! an interval task feed a single queue; the dispatch loop applies each entry
//! to completion before taking the next, so the session never sees two
//! stimuli at once.

use std::time::Duration;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::core::{SessionController, SessionSnapshot, TileSource};
use crate::engine::{apply_swap, find_swaps, SwapError};
use crate::protocol::*;
use crate::types::{Coord, Stimulus};

const QUEUE_CAPACITY: usize = 64;

/// Entry in the dispatch queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Line(String),
    Tick,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Drive `session` from `reader` until `quit` or end of input.
///
/// With `tick` set, a countdown tick (plus one second of life regeneration)
/// is applied every period and followed by an observation. Returns the
/// session in its final state.
pub async fn run<R, W, S>(
    session: SessionController<S>,
    tick: Option<Duration>,
    reader: R,
    writer: W,
) -> anyhow::Result<SessionController<S>>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin,
    S: TileSource,
{
    let (tx, mut rx) = mpsc::channel::<Inbound>(QUEUE_CAPACITY);
    let reader_task = tokio::spawn(read_lines(reader, tx.clone()));
    let ticker_task = tick.map(|period| tokio::spawn(drive_ticks(period, tx.clone())));
    drop(tx);

    info!(
        levels = session.levels().len(),
        tick_ms = tick.map(|d| d.as_millis() as u64).unwrap_or(0),
        "runner started"
    );

    let mut dispatcher = Dispatcher::new(session, writer);
    dispatcher.send_events().await?;
    dispatcher.send_observation(0).await?;
    dispatcher.flush().await?;

    while let Some(entry) = rx.recv().await {
        let flow = match entry {
            Inbound::Line(line) => dispatcher.handle_line(&line).await?,
            Inbound::Tick => dispatcher.handle_scheduled_tick().await?,
            Inbound::Closed => Flow::Quit,
        };
        dispatcher.flush().await?;
        if flow == Flow::Quit {
            break;
        }
    }

    reader_task.abort();
    if let Some(task) = ticker_task {
        task.abort();
    }

    let session = dispatcher.session;
    info!(
        phase = session.phase().as_str(),
        score = session.state().score,
        "runner stopped"
    );
    Ok(session)
}

async fn read_lines<R>(reader: R, tx: mpsc::Sender<Inbound>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tx.send(Inbound::Line(line)).await.is_err() {
                    return;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "input read failed");
                break;
            }
        }
    }
    let _ = tx.send(Inbound::Closed).await;
}

async fn drive_ticks(period: Duration, tx: mpsc::Sender<Inbound>) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    interval.tick().await;
    loop {
        interval.tick().await;
        if tx.send(Inbound::Tick).await.is_err() {
            break;
        }
    }
}

struct Dispatcher<S: TileSource, W> {
    session: SessionController<S>,
    writer: W,
    buf: Vec<u8>,
    snapshot: SessionSnapshot,
}

impl<S, W> Dispatcher<S, W>
where
    S: TileSource,
    W: AsyncWrite + Unpin,
{
    fn new(session: SessionController<S>, writer: W) -> Self {
        Self {
            session,
            writer,
            buf: Vec::with_capacity(4096),
            snapshot: SessionSnapshot::default(),
        }
    }

    async fn handle_line(&mut self, line: &str) -> anyhow::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        match parse_message(line) {
            Ok(ParsedMessage::Client(msg)) => self.handle_client(msg).await,
            Ok(ParsedMessage::Unknown(unknown)) => {
                self.send_error(unknown.seq, ErrorCode::UnknownType, "unknown message type")
                    .await?;
                Ok(Flow::Continue)
            }
            Err(e) => {
                debug!(error = %e, "rejected input line");
                self.send_error(0, ErrorCode::InvalidMessage, &e.to_string())
                    .await?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn handle_client(&mut self, msg: ClientMessage) -> anyhow::Result<Flow> {
        let seq = msg.seq();
        debug!(seq, ?msg, "client message");

        let result: Result<bool, (ErrorCode, String)> = match msg {
            ClientMessage::Select { row, col, .. } => {
                self.apply(Stimulus::SelectTile(Coord::new(row, col)))
            }
            ClientMessage::Swap { from, to, .. } => {
                apply_swap(&mut self.session, from.into(), to.into())
                    .map(|_| true)
                    .map_err(|e| (e.into(), swap_error_message(e)))
            }
            ClientMessage::ClearObstacle { row, col, .. } => {
                self.apply(Stimulus::ClearObstacle(Coord::new(row, col)))
            }
            ClientMessage::Tick { .. } => Ok(self.advance_clock()),
            ClientMessage::SelectLevel { index, .. } => self.apply(Stimulus::SelectLevel(index)),
            ClientMessage::Observe { .. } => {
                self.send_observation(seq).await?;
                return Ok(Flow::Continue);
            }
            ClientMessage::Hint { .. } => {
                let swaps = find_swaps(self.session.grid());
                self.write_message(&create_hint(seq, &swaps)).await?;
                return Ok(Flow::Continue);
            }
            ClientMessage::Quit { .. } => {
                self.write_message(&create_ack(seq, false)).await?;
                return Ok(Flow::Quit);
            }
        };

        match result {
            Ok(changed) => self.write_message(&create_ack(seq, changed)).await?,
            Err((code, message)) => self.send_error(seq, code, &message).await?,
        }
        self.send_events().await?;
        Ok(Flow::Continue)
    }

    async fn handle_scheduled_tick(&mut self) -> anyhow::Result<Flow> {
        if self.session.is_over() {
            return Ok(Flow::Continue);
        }
        self.advance_clock();
        self.send_events().await?;
        self.send_observation(0).await?;
        Ok(Flow::Continue)
    }

    fn apply(&mut self, stimulus: Stimulus) -> Result<bool, (ErrorCode, String)> {
        debug!(stimulus = stimulus.as_str(), "applying stimulus");
        self.session
            .apply(stimulus)
            .map_err(|e| (e.into(), e.to_string()))
    }

    /// One second of countdown and one second of regeneration
    fn advance_clock(&mut self) -> bool {
        let counted = self.apply(Stimulus::Tick).unwrap_or(false);
        let regenerated = self.apply(Stimulus::RegenTick).unwrap_or(false);
        debug!(counted, regenerated, "clock advanced");
        counted
    }

    async fn send_events(&mut self) -> anyhow::Result<()> {
        for event in self.session.take_events() {
            self.write_message(&create_event(event)).await?;
        }
        Ok(())
    }

    async fn send_observation(&mut self, seq: u64) -> anyhow::Result<()> {
        self.session.snapshot_into(&mut self.snapshot);
        let obs = ObservationMessage::from_snapshot(seq, &self.snapshot);
        self.write_message(&obs).await
    }

    async fn send_error(&mut self, seq: u64, code: ErrorCode, message: &str) -> anyhow::Result<()> {
        self.write_message(&create_error(seq, code, message)).await
    }

    async fn write_message<T: Serialize>(&mut self, msg: &T) -> anyhow::Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, msg)?;
        self.buf.push(b'\n');
        self.writer.write_all(&self.buf).await?;
        Ok(())
    }

    async fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush().await?;
        Ok(())
    }
}

fn swap_error_message(err: SwapError) -> String {
    match err {
        SwapError::Engine(e) => e.to_string(),
        other => other.message().to_string(),
    }
}
