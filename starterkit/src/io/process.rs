//! Running child processes while forwarding their output as it arrives.

use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, instrument, warn};
use wait_timeout::ChildExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Result of a streamed child process.
#[derive(Debug)]
pub struct StreamedOutput {
    pub status: ExitStatus,
    /// Last bytes of stderr (bounded), kept for error messages.
    pub stderr_tail: Vec<u8>,
    pub timed_out: bool,
}

impl StreamedOutput {
    pub fn stderr_tail_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr_tail).trim().to_string()
    }
}

/// Run a command, copying its stdout and stderr into `sink` as they are produced.
///
/// Both pipes are drained on reader threads so neither can fill up and block the child.
/// With `timeout` set the child is killed once the deadline passes; without it the call
/// waits as long as the child runs. The last `tail_limit` bytes of stderr are kept.
#[instrument(skip_all, fields(program = ?cmd.get_program(), timeout = ?timeout))]
pub fn run_command_streaming(
    mut cmd: Command,
    timeout: Option<Duration>,
    tail_limit: usize,
    sink: &mut dyn Write,
) -> Result<StreamedOutput> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!("spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).with_context(|| format!("spawn {:?}", cmd.get_program()));
        }
    };

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("stderr was not piped"))?;

    let (tx, rx) = mpsc::channel();
    let readers = [
        spawn_reader(Stream::Stdout, stdout, tx.clone()),
        spawn_reader(Stream::Stderr, stderr, tx),
    ];

    let deadline = timeout.map(|limit| Instant::now() + limit);
    let mut stderr_tail = Vec::new();
    loop {
        let received = match deadline {
            Some(deadline) => rx.recv_timeout(deadline.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok((stream, chunk)) => {
                if let Err(err) = sink.write_all(&chunk).and_then(|()| sink.flush()) {
                    kill(&mut child);
                    return Err(err).context("forward command output");
                }
                if stream == Stream::Stderr {
                    push_tail(&mut stderr_tail, &chunk, tail_limit);
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => return timed_out(child, stderr_tail, timeout),
        }
    }

    let status = match deadline {
        Some(deadline) => {
            let left = deadline.saturating_duration_since(Instant::now());
            match child.wait_timeout(left).context("wait for command")? {
                Some(status) => status,
                None => return timed_out(child, stderr_tail, timeout),
            }
        }
        None => child.wait().context("wait for command")?,
    };

    for reader in readers {
        match reader.join() {
            Ok(result) => result?,
            Err(_) => return Err(anyhow!("output reader thread panicked")),
        }
    }

    debug!(exit_code = ?status.code(), "command finished");
    Ok(StreamedOutput {
        status,
        stderr_tail,
        timed_out: false,
    })
}

fn timed_out(
    mut child: Child,
    stderr_tail: Vec<u8>,
    timeout: Option<Duration>,
) -> Result<StreamedOutput> {
    warn!(timeout = ?timeout, "command timed out, killing");
    child.kill().context("kill command")?;
    let status = child.wait().context("wait command after kill")?;
    // Reader threads are left to finish on their own; a grandchild may still hold the pipes.
    Ok(StreamedOutput {
        status,
        stderr_tail,
        timed_out: true,
    })
}

fn kill(child: &mut Child) {
    if let Err(err) = child.kill() {
        warn!(err = %err, "failed to kill command");
    }
}

fn spawn_reader<R: Read + Send + 'static>(
    stream: Stream,
    mut reader: R,
    tx: Sender<(Stream, Vec<u8>)>,
) -> thread::JoinHandle<Result<()>> {
    thread::spawn(move || {
        let mut chunk = [0u8; 8192];
        loop {
            let n = reader.read(&mut chunk).context("read output")?;
            if n == 0 {
                return Ok(());
            }
            if tx.send((stream, chunk[..n].to_vec())).is_err() {
                return Ok(());
            }
        }
    })
}

fn push_tail(tail: &mut Vec<u8>, chunk: &[u8], limit: usize) {
    tail.extend_from_slice(chunk);
    if tail.len() > limit {
        let excess = tail.len() - limit;
        tail.drain(..excess);
    }
}
