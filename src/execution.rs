use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::{self, BufRead, BufReader, Read};
use std::iter;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;

use crate::config::{OutputMode, RunMode};
use crate::types::Invocation;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded { stdout: String },
    Failed { code: Option<i32>, stderr: String },
    Interrupted,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to start `{command_line}`")]
    Spawn {
        command_line: String,
        #[source]
        source: io::Error,
    },
    #[error("failed while waiting for script \"{script}\"")]
    Wait {
        script: String,
        #[source]
        source: io::Error,
    },
    #[error("script \"{script}\" {}", describe_exit(.code))]
    ScriptFailed { script: String, code: Option<i32> },
}

impl RunError {
    /// Exit code for this process when a script run fails.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::ScriptFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with code {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// Ctrl-C notifications, delivered on a channel instead of killing this
/// process.
pub struct Interrupts {
    receiver: Receiver<()>,
}

impl Interrupts {
    /// Installs the process-wide handler. Can only be called once.
    pub fn install() -> Result<Self, ctrlc::Error> {
        let (sender, receiver) = mpsc::channel();
        ctrlc::set_handler(move || {
            let _ = sender.send(());
        })?;
        Ok(Self::from_receiver(receiver))
    }

    pub fn from_receiver(receiver: Receiver<()>) -> Self {
        Self { receiver }
    }

    fn drain(&self) {
        while self.receiver.try_recv().is_ok() {}
    }

    /// Blocks for up to `timeout`; true if an interrupt arrived.
    fn wait(&self, timeout: Duration) -> bool {
        match self.receiver.recv_timeout(timeout) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(timeout);
                false
            }
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait ScriptExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<RunOutcome, RunError>;
}

/// Runs invocations through the OS shell, one child at a time.
pub struct ShellExecutor {
    dir: PathBuf,
    output: OutputMode,
    interrupts: Interrupts,
}

impl ShellExecutor {
    pub fn new(dir: &Path, output: OutputMode, interrupts: Interrupts) -> Self {
        Self {
            dir: dir.to_path_buf(),
            output,
            interrupts,
        }
    }

    /// `PATH` with `<dir>/node_modules/.bin` in front.
    fn local_bin_path(&self) -> Option<OsString> {
        let dir = fs::canonicalize(&self.dir).unwrap_or_else(|_| self.dir.clone());
        let local_bin = dir.join("node_modules").join(".bin");
        let inherited = env::var_os("PATH").unwrap_or_default();
        let paths = iter::once(local_bin).chain(env::split_paths(&inherited));
        match env::join_paths(paths) {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::warn!(error = %err, "cannot add node_modules/.bin to PATH");
                None
            }
        }
    }
}

impl ScriptExecutor for ShellExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<RunOutcome, RunError> {
        self.interrupts.drain();

        let mut command = shell_command(&invocation.command_line);
        if invocation.run_mode == RunMode::Direct {
            // Package managers put the project's local binaries first on PATH.
            if let Some(path) = self.local_bin_path() {
                command.env("PATH", path);
            }
        }
        let mut child = command
            .current_dir(&self.dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunError::Spawn {
                command_line: invocation.command_line.clone(),
                source,
            })?;
        tracing::debug!(
            pid = child.id(),
            command = %invocation.command_line,
            "spawned script"
        );

        let streamed = self.output == OutputMode::Streamed;
        let stdout = child
            .stdout
            .take()
            .map(|pipe| relay(pipe, streamed.then_some(echo_stdout as fn(&str))));
        let stderr = child
            .stderr
            .take()
            .map(|pipe| relay(pipe, streamed.then_some(echo_stderr as fn(&str))));

        let wait_error = |source| RunError::Wait {
            script: invocation.script.clone(),
            source,
        };
        let status = loop {
            if let Some(status) = child.try_wait().map_err(wait_error)? {
                break status;
            }
            if self.interrupts.wait(POLL_INTERVAL) {
                tracing::info!(script = %invocation.script, "interrupted, stopping script");
                if let Err(err) = child.kill() {
                    tracing::warn!(error = %err, "failed to kill script");
                }
                if let Err(err) = child.wait() {
                    tracing::warn!(error = %err, "failed to reap script");
                }
                // Descendants may still hold the pipes open; the reader
                // threads are left to finish on their own.
                return Ok(RunOutcome::Interrupted);
            }
        };
        tracing::debug!(script = %invocation.script, ?status, "script finished");

        let stdout = collect(stdout);
        let stderr = collect(stderr);
        if status.success() {
            Ok(RunOutcome::Succeeded { stdout })
        } else {
            Ok(RunOutcome::Failed {
                code: status.code(),
                stderr,
            })
        }
    }
}

fn shell_command(command_line: &str) -> Command {
    if cfg!(windows) {
        let mut command = Command::new("cmd");
        command.arg("/C").arg(command_line);
        command
    } else {
        let mut command = Command::new("sh");
        command.arg("-c").arg(command_line);
        command
    }
}

fn echo_stdout(line: &str) {
    println!("{}", line);
}

fn echo_stderr(line: &str) {
    eprintln!("{}", line);
}

/// Drains `pipe` on a background thread. Lines are echoed when `echo` is
/// set, otherwise captured and returned.
fn relay<R: Read + Send + 'static>(pipe: R, echo: Option<fn(&str)>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut reader = BufReader::new(pipe);
        let mut captured = String::new();
        let mut line = Vec::new();
        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    let text = String::from_utf8_lossy(&line);
                    match echo {
                        Some(echo) => echo(text.trim_end_matches(&['\r', '\n'][..])),
                        None => captured.push_str(&text),
                    }
                }
            }
        }
        captured
    })
}

fn collect(reader: Option<JoinHandle<String>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
