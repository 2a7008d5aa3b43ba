//! Child process execution under a deadline.

use crossbeam_channel::{Receiver, bounded};
use log::debug;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::CapabilityError;
use crate::utils::config::{PIPE_DRAIN_GRACE, PROCESS_POLL_INTERVAL};

/// Captured output of a finished child.
#[derive(Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Drain a pipe on its own thread so the child never blocks on a full buffer.
/// The text arrives on the returned channel once the pipe closes. The thread is detached:
/// a grandchild that inherited the pipe may keep it open past the deadline.
fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<String> {
    let (tx, rx) = bounded(1);
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut p) = pipe {
            let _ = p.read_to_end(&mut buf);
        }
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

/// Output collected by a reader before `deadline`; whatever is still pending is given up on.
fn collect_until(reader: &Receiver<String>, deadline: Instant) -> String {
    reader.recv_deadline(deadline).unwrap_or_default()
}

fn kill_and_reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Run `cmd` to completion or until `timeout` elapses. On timeout the child is killed and reaped
/// and [`CapabilityError::TimedOut`] is returned without waiting on its pipes.
pub fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
) -> Result<ProcessOutput, CapabilityError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let program = cmd.get_program().to_string_lossy().into_owned();
    let mut child = cmd
        .spawn()
        .map_err(|e| CapabilityError::Launch(format!("{program}: {e}")))?;

    let stdout = spawn_reader(child.stdout.take());
    let stderr = spawn_reader(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() >= deadline => {
                debug!("{} exceeded {:?}, killing", program, timeout);
                kill_and_reap(&mut child);
                return Err(CapabilityError::TimedOut);
            }
            Ok(None) => thread::sleep(PROCESS_POLL_INTERVAL),
            Err(e) => {
                kill_and_reap(&mut child);
                return Err(CapabilityError::Launch(format!("{program}: {e}")));
            }
        }
    };

    // The child is done, but a grandchild may still hold the pipes.
    let drain_by = deadline.max(Instant::now() + PIPE_DRAIN_GRACE);
    let stdout = collect_until(&stdout, drain_by);
    let stderr = collect_until(&stderr, drain_by);
    Ok(ProcessOutput {
        status,
        stdout,
        stderr,
    })
}
