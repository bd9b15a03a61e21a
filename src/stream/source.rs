use std::io::{Read, Seek, SeekFrom};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use flume::{Receiver, Sender};
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_LENGTH, RANGE};
use tracing::{debug, warn};

use super::buffer::BufferState;
use crate::audio::error::AudioError;

const CHUNK_SIZE: u64 = 256 * 1024;
const MIN_INITIAL_DATA: usize = 32 * 1024;
const WAIT_STEP: Duration = Duration::from_millis(50);
const MAX_WAIT_STEPS: usize = 200;

enum FetchCommand {
    Fetch { start: u64, end: u64 },
    Shutdown,
}

/// `Read + Seek` view of a remote media file, fetched in `Range` chunks by a
/// background thread.
///
/// All methods block; create and read it from blocking contexts only (the
/// decoder runs on the audio output thread).
pub struct HttpMediaSource {
    total_bytes: u64,
    position: u64,
    buffer: Arc<Mutex<BufferState>>,
    fetch_tx: Sender<FetchCommand>,
    fetched_rx: Receiver<()>,
}

impl HttpMediaSource {
    pub fn open(client: Client, url: &str) -> Result<Self, AudioError> {
        let head = client
            .head(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| AudioError::Network(e.to_string()))?;
        let total_bytes = head
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|len| *len > 0)
            .ok_or_else(|| AudioError::Stream(format!("content-length missing for {url}")))?;

        let buffer = Arc::new(Mutex::new(BufferState::new(total_bytes)));
        let (fetch_tx, fetch_rx) = flume::unbounded();
        let (fetched_tx, fetched_rx) = flume::unbounded();

        {
            let buffer = Arc::clone(&buffer);
            let url = url.to_string();
            thread::Builder::new()
                .name("media-fetch".into())
                .spawn(move || fetch_loop(client, url, buffer, fetch_rx, fetched_tx))
                .map_err(|e| AudioError::Stream(e.to_string()))?;
        }

        let source = Self {
            total_bytes,
            position: 0,
            buffer,
            fetch_tx,
            fetched_rx,
        };

        source.fetch(0)?;
        source.wait_for(0, MIN_INITIAL_DATA)?;
        debug!(url, total_bytes, "media_source_opened");
        Ok(source)
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    fn lock(&self) -> MutexGuard<'_, BufferState> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fetch(&self, start: u64) -> Result<(), AudioError> {
        let end = (start + CHUNK_SIZE).min(self.total_bytes);
        if start >= end {
            return Ok(());
        }
        self.lock().mark_pending(start, end);
        self.fetch_tx
            .send(FetchCommand::Fetch { start, end })
            .map_err(|_| AudioError::Stream("fetch thread stopped".into()))
    }

    fn wait_for(&self, pos: u64, min: usize) -> Result<(), AudioError> {
        for _ in 0..MAX_WAIT_STEPS {
            {
                let buf = self.lock();
                if buf.available_from(pos) >= min || (buf.eof && buf.contains(pos)) {
                    return Ok(());
                }
            }
            match self.fetched_rx.recv_timeout(WAIT_STEP) {
                Ok(()) | Err(flume::RecvTimeoutError::Timeout) => {}
                Err(flume::RecvTimeoutError::Disconnected) => break,
            }
        }
        Err(AudioError::Stream(format!("timed out waiting for byte {pos}")))
    }

    fn ensure(&self, pos: u64) -> Result<(), AudioError> {
        if self.lock().contains(pos) {
            return Ok(());
        }
        self.lock().clear(pos);
        self.fetch(pos)?;
        let min = (self.total_bytes - pos).min(MIN_INITIAL_DATA as u64) as usize;
        self.wait_for(pos, min)
    }

    fn trigger_prefetch(&self) {
        let start = {
            let buf = self.lock();
            if !buf.should_prefetch(self.position) {
                return;
            }
            buf.end_pos()
        };
        if let Err(e) = self.fetch(start) {
            warn!(error = %e, "media_prefetch_failed");
        }
    }
}

fn fetch_loop(
    client: Client,
    url: String,
    buffer: Arc<Mutex<BufferState>>,
    rx: Receiver<FetchCommand>,
    tx: Sender<()>,
) {
    while let Ok(cmd) = rx.recv() {
        match cmd {
            FetchCommand::Fetch { start, end } => {
                let result = fetch_range(&client, &url, start, end);
                {
                    let mut buf = buffer.lock().unwrap_or_else(PoisonError::into_inner);
                    match result {
                        Ok(data) => {
                            buf.append(&data, start);
                        }
                        Err(e) => {
                            warn!(error = %e, start, end, "media_fetch_failed");
                            buf.clear_pending();
                        }
                    }
                }
                let _ = tx.send(());
            }
            FetchCommand::Shutdown => break,
        }
    }
}

fn fetch_range(client: &Client, url: &str, start: u64, end: u64) -> reqwest::Result<Vec<u8>> {
    let resp = client
        .get(url)
        .header(RANGE, range_header(start, end))
        .send()?
        .error_for_status()?;
    Ok(resp.bytes()?.to_vec())
}

/// Blocking client for media hosts. Never sends a `Referer`.
pub fn media_client() -> Result<Client, AudioError> {
    Client::builder()
        .referer(false)
        .build()
        .map_err(|e| AudioError::Network(e.to_string()))
}

/// Inclusive HTTP byte range for the half-open span `[start, end)`.
pub(crate) fn range_header(start: u64, end: u64) -> String {
    format!("bytes={}-{}", start, end.saturating_sub(1))
}

impl Read for HttpMediaSource {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.position >= self.total_bytes || buf.is_empty() {
            return Ok(0);
        }

        self.ensure(self.position).map_err(std::io::Error::other)?;

        let read = {
            let mut b = self.lock();
            let read = b.read_at(self.position, buf);
            b.discard_before(self.position);
            read
        };

        self.position += read as u64;
        if read > 0 {
            self.trigger_prefetch();
        }
        Ok(read)
    }
}

impl Seek for HttpMediaSource {
    fn seek(&mut self, from: SeekFrom) -> std::io::Result<u64> {
        let new = match from {
            SeekFrom::Start(o) => o,
            SeekFrom::End(off) => self.total_bytes.saturating_add_signed(off),
            SeekFrom::Current(off) => self.position.saturating_add_signed(off),
        }
        .min(self.total_bytes);

        self.position = new;
        Ok(new)
    }
}

// The fetch thread is detached: joining here could stall the audio thread
// behind an in-flight range request.
impl Drop for HttpMediaSource {
    fn drop(&mut self) {
        let _ = self.fetch_tx.send(FetchCommand::Shutdown);
    }
}
