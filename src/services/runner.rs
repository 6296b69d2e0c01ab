use std::cell::RefCell;
use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};

#[derive(Debug, Clone, PartialEq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Wrap in `sudo` when `enabled`.
    pub fn privileged(self, enabled: bool) -> Self {
        if !enabled {
            return self;
        }
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(self.program);
        args.extend(self.args);
        Self {
            program: "sudo".to_string(),
            args,
            cwd: self.cwd,
        }
    }

    /// Shell-quoted form, suitable for copy/paste.
    pub fn render(&self) -> String {
        let words =
            std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        let joined = shlex::try_join(words.clone())
            .unwrap_or_else(|_| words.collect::<Vec<_>>().join(" "));
        match &self.cwd {
            Some(dir) => {
                let dir = dir.to_string_lossy();
                let quoted = shlex::try_quote(&dir).unwrap_or(dir.clone());
                format!("(cd {quoted} && {joined})")
            }
            None => joined,
        }
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }
}

/// Seam between services and `std::process`.
pub trait CommandRunner {
    /// Run to completion and return the exit code.
    fn run(&self, cmd: &CommandLine) -> anyhow::Result<i32>;
    /// Start without waiting; returns the child pid when one exists.
    fn spawn(&self, cmd: &CommandLine) -> anyhow::Result<Option<u32>>;
    fn is_dry_run(&self) -> bool {
        false
    }
    /// Collect background children that have exited; returns how many.
    fn reap(&self) -> usize {
        0
    }
}

/// Runs commands for real. With `stdout_to_stderr` set, child stdout is sent to
/// our stderr so a `--json` document on stdout stays intact.
pub struct SystemRunner {
    stdout_to_stderr: bool,
    children: RefCell<Vec<Child>>,
}

impl SystemRunner {
    pub fn new(stdout_to_stderr: bool) -> Self {
        Self {
            stdout_to_stderr,
            children: RefCell::default(),
        }
    }

    fn command(&self, cmd: &CommandLine) -> Command {
        let mut command = cmd.to_command();
        if self.stdout_to_stderr {
            command.stdout(std::io::stderr());
        }
        command
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(sig)) => 128 + sig,
        (None, None) => 1,
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &CommandLine) -> anyhow::Result<i32> {
        tracing::info!(command = %cmd.render(), "running");
        let status = self
            .command(cmd)
            .status()
            .map_err(|e| anyhow::anyhow!("failed to start `{}`: {e}", cmd.program))?;
        let code = exit_code(status);
        tracing::debug!(command = %cmd.render(), code, "finished");
        Ok(code)
    }

    fn spawn(&self, cmd: &CommandLine) -> anyhow::Result<Option<u32>> {
        tracing::info!(command = %cmd.render(), "spawning");
        let child = self
            .command(cmd)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| anyhow::anyhow!("failed to start `{}`: {e}", cmd.program))?;
        let pid = child.id();
        // Daemons still running at exit are left alone, not killed.
        self.children.borrow_mut().push(child);
        Ok(Some(pid))
    }

    fn reap(&self) -> usize {
        let mut children = self.children.borrow_mut();
        let before = children.len();
        children.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                let code = exit_code(status);
                tracing::info!(pid = child.id(), code, "background child exited");
                false
            }
            Ok(None) => true,
            Err(e) => {
                tracing::warn!(pid = child.id(), error = %e, "could not poll child");
                false
            }
        });
        before - children.len()
    }
}

/// Records rendered command lines instead of executing them.
#[derive(Default)]
pub struct DryRunner {
    recorded: RefCell<Vec<String>>,
}

impl DryRunner {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn recorded(&self) -> Vec<String> {
        self.recorded.borrow().clone()
    }
}

impl CommandRunner for DryRunner {
    fn run(&self, cmd: &CommandLine) -> anyhow::Result<i32> {
        tracing::info!(command = %cmd.render(), "dry-run: would run");
        self.recorded.borrow_mut().push(cmd.render());
        Ok(0)
    }

    fn spawn(&self, cmd: &CommandLine) -> anyhow::Result<Option<u32>> {
        tracing::info!(command = %cmd.render(), "dry-run: would spawn");
        self.recorded.borrow_mut().push(cmd.render());
        Ok(None)
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}
