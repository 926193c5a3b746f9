use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use pack_core::error::{PackError, PackResult};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Builder for constructing and executing external processes.
///
/// Provides a fluent API for setting program, arguments, environment variables,
/// working directory and an optional time limit.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    env: HashMap<String, String>,
    cwd: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl CommandBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: HashMap::new(),
            cwd: None,
            timeout: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set the working directory for the child process.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Kill the child if it runs longer than `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments joined for display
    pub fn display_args(&self) -> String {
        self.args.join(" ")
    }

    /// Execute the command and return its output, whatever the exit status.
    pub fn exec(&self) -> PackResult<Output> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (k, v) in &self.env {
            cmd.env(k, v);
        }
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(Path::new(dir));
        }

        tracing::debug!("Running `{} {}`", self.program, self.display_args());
        let mut child = cmd
            .spawn()
            .map_err(|e| PackError::io(format!("Failed to run {}", self.program), e))?;

        // drain both pipes while waiting so a chatty child cannot block
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let start = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if let Some(limit) = self.timeout {
                        if start.elapsed() > limit {
                            let _ = child.kill();
                            let _ = child.wait();
                            tracing::warn!("`{}` timed out after {:?}", self.program, limit);
                            return Err(PackError::CommandTimeout {
                                program: self.program.clone(),
                                seconds: limit.as_secs() + u64::from(limit.subsec_nanos() > 0),
                            });
                        }
                    }
                    thread::sleep(POLL_INTERVAL);
                },
                Err(e) => {
                    return Err(PackError::io(
                        format!("Failed to wait for {}", self.program),
                        e,
                    ))
                },
            }
        };

        Ok(Output {
            status,
            stdout: collect(stdout),
            stderr: collect(stderr),
        })
    }

    /// Execute the command, turning a non-zero exit into an error.
    pub fn exec_checked(&self) -> PackResult<Output> {
        let output = self.exec()?;
        if output.status.success() {
            Ok(output)
        } else {
            Err(PackError::VcsCommand {
                program: self.program.clone(),
                args: self.display_args(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<thread::JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
