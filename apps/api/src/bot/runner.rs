//! Launches the external automation bot and captures its output.
//!
//! Deliberately minimal lifecycle: one run at a time, fire-and-forget
//! start, stdout/stderr streamed line-by-line into an in-memory buffer
//! that the status endpoint serves back. No cancellation, no queueing.

use std::process::Stdio;
use std::sync::Arc;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct BotStatus {
    pub running: bool,
    pub output: Vec<String>,
}

#[derive(Default)]
struct Inner {
    child: Option<Child>,
    output: Vec<String>,
}

#[derive(Clone)]
pub struct BotRunner {
    program: String,
    args: Vec<String>,
    inner: Arc<Mutex<Inner>>,
}

impl BotRunner {
    /// Builds a runner from a whitespace-separated command line, e.g.
    /// `python runAiBot.py`.
    pub fn new(command: &str) -> anyhow::Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("BOT_COMMAND must not be empty"))?;
        Ok(Self {
            program,
            args: parts.collect(),
            inner: Arc::new(Mutex::new(Inner::default())),
        })
    }

    /// Spawns the bot process. Fails with a validation error if a previous
    /// run is still alive; previous output is discarded on a new start.
    pub async fn start(&self) -> Result<(), AppError> {
        let mut inner = self.inner.lock().await;

        if let Some(child) = inner.child.as_mut() {
            let exited = child
                .try_wait()
                .map_err(|e| AppError::Bot(format!("could not poll bot process: {e}")))?;
            if exited.is_none() {
                return Err(AppError::Validation("bot is already running".to_string()));
            }
        }

        inner.output.clear();

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AppError::Bot(format!("failed to spawn '{}': {e}", self.program)))?;

        if let Some(stdout) = child.stdout.take() {
            self.capture_lines(stdout);
        }
        if let Some(stderr) = child.stderr.take() {
            self.capture_lines(stderr);
        }

        inner.child = Some(child);
        info!("Bot started: {} {}", self.program, self.args.join(" "));
        Ok(())
    }

    pub async fn status(&self) -> BotStatus {
        let mut inner = self.inner.lock().await;
        let running = match inner.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        };
        BotStatus {
            running,
            output: inner.output.clone(),
        }
    }

    fn capture_lines<R>(&self, stream: R)
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let mut lines = BufReader::new(stream).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!("bot: {line}");
                inner.lock().await.output.push(line);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn wait_for_line(runner: &BotRunner, expected: &str) -> BotStatus {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let status = runner.status().await;
                if status.output.iter().any(|l| l.contains(expected)) {
                    return status;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await
        .expect("bot output never arrived")
    }

    #[test]
    fn test_empty_command_is_rejected() {
        assert!(BotRunner::new("   ").is_err());
    }

    #[tokio::test]
    async fn test_start_captures_stdout() {
        let runner = BotRunner::new("echo applied to 3 jobs").unwrap();
        runner.start().await.unwrap();
        let status = wait_for_line(&runner, "applied to 3 jobs").await;
        assert_eq!(status.output.len(), 1);
    }

    #[tokio::test]
    async fn test_second_start_while_running_is_rejected() {
        let runner = BotRunner::new("sleep 2").unwrap();
        runner.start().await.unwrap();
        assert!(runner.status().await.running);

        let err = runner.start().await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_restart_after_exit_clears_output() {
        let runner = BotRunner::new("echo round").unwrap();
        runner.start().await.unwrap();
        wait_for_line(&runner, "round").await;

        // wait for the process to be reaped as exited
        tokio::time::timeout(Duration::from_secs(5), async {
            while runner.status().await.running {
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await
        .expect("bot never exited");

        runner.start().await.unwrap();
        let status = wait_for_line(&runner, "round").await;
        assert_eq!(status.output.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_program_is_a_bot_error() {
        let runner = BotRunner::new("definitely-not-a-real-binary-42").unwrap();
        let err = runner.start().await.unwrap_err();
        assert!(matches!(err, AppError::Bot(_)));
    }
}
