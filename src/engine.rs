use std::process::{Child, ChildStdin, Command, Stdio};

use tracing::{debug, warn};

use crate::error::{PlotError, PlotResult};
use crate::script::Script;
use crate::EngineOptions;

/// A running plotting engine fed through its stdin.
///
/// The pipe is closed and the process reaped when the connection is dropped,
/// so every exit path releases it.
pub struct Engine {
    program: String,
    child: Child,
    stdin: Option<ChildStdin>,
}

impl Engine {
    pub fn spawn(options: &EngineOptions) -> PlotResult<Self> {
        let mut cmd = Command::new(&options.program);
        if options.persist {
            cmd.arg("-persist");
        }
        cmd.args(&options.args).stdin(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            PlotError::engine(format!(
                "could not open pipe to '{}' (is it installed and on PATH?): {e}",
                options.program
            ))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| PlotError::engine("failed to open engine stdin"))?;

        debug!(program = %options.program, pid = child.id(), "engine started");
        Ok(Self {
            program: options.program.clone(),
            child,
            stdin: Some(stdin),
        })
    }

    pub fn send(&mut self, script: &Script) -> PlotResult<()> {
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(PlotError::engine("engine connection is already closed"));
        };
        script.write_to(stdin).map_err(|e| {
            PlotError::engine(format!("failed to write script to '{}': {e}", self.program))
        })
    }

    /// Close the pipe and wait for the engine to exit.
    pub fn close(mut self) -> PlotResult<()> {
        drop(self.stdin.take());
        let status = self.child.wait().map_err(|e| {
            PlotError::engine(format!("failed to wait for '{}': {e}", self.program))
        })?;
        if !status.success() {
            return Err(PlotError::engine(format!(
                "'{}' exited with status {status}",
                self.program
            )));
        }
        Ok(())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        // Already reaped by close().
        if self.stdin.is_none() {
            return;
        }
        drop(self.stdin.take());
        if let Err(e) = self.child.wait() {
            warn!(program = %self.program, "failed to reap engine: {e}");
        }
    }
}
