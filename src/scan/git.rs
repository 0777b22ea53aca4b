use std::fmt;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Every git query runs at most once, with this fixed deadline.
pub const GIT_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug)]
pub enum GitError {
    Timeout,
    Failed,
    Io(std::io::Error),
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitError::Timeout => write!(f, "timed out after {}s", GIT_TIMEOUT.as_secs()),
            GitError::Failed => write!(f, "exited with a non-zero status"),
            GitError::Io(e) => write!(f, "{e}"),
        }
    }
}

/// Runs a git query in `root` and returns its stdout. Stdout is drained on a
/// helper thread so a chatty child cannot block on a full pipe while the
/// deadline loop polls.
pub fn run_git(root: &Path, args: &[&str]) -> Result<String, GitError> {
    let mut child = Command::new("git")
        .arg("-C")
        .arg(root)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(GitError::Io)?;

    let stdout_pipe = child.stdout.take();
    let reader = thread::spawn(move || {
        let mut buffer = String::new();
        if let Some(mut pipe) = stdout_pipe {
            let _ = pipe.read_to_string(&mut buffer);
        }
        buffer
    });

    let deadline = Instant::now() + GIT_TIMEOUT;
    loop {
        match child.try_wait().map_err(GitError::Io)? {
            Some(status) => {
                let stdout = reader.join().unwrap_or_default();
                if status.success() {
                    return Ok(stdout);
                }
                return Err(GitError::Failed);
            }
            None => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = reader.join();
                    return Err(GitError::Timeout);
                }
                thread::sleep(POLL_INTERVAL);
            }
        }
    }
}
