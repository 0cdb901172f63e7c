use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// TestHarness provides an isolated environment for driving the reqctl
/// binary: a temporary directory for document files, a private config
/// location, and a scrubbed set of `REQCTL_*` variables so the host
/// environment cannot leak into assertions.
pub struct TestHarness {
    pub dir: TempDir,
    pub binary: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        TestHarness {
            dir: TempDir::new().expect("Failed to create temp dir"),
            binary: PathBuf::from(env!("CARGO_BIN_EXE_reqctl")),
        }
    }

    /// Returns the base directory path (the TempDir path).
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a document into the harness directory and return its name.
    pub fn write_doc(&self, name: &str, content: &str) -> String {
        fs::write(self.path().join(name), content).expect("Failed to write document");
        name.to_string()
    }

    /// Write the global config file inside the harness config location.
    #[allow(dead_code)]
    pub fn write_config(&self, content: &str) {
        let config_dir = self.path().join("config").join("reqctl");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        fs::write(config_dir.join("config.yaml"), content).expect("Failed to write config");
    }

    /// Run the reqctl binary with the given arguments in the harness
    /// directory.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("Failed to run reqctl")
    }

    /// Run the binary feeding `input` on stdin.
    #[allow(dead_code)]
    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn reqctl");
        child
            .stdin
            .take()
            .expect("stdin not captured")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
        child.wait_with_output().expect("Failed to wait for reqctl")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .args(args)
            .current_dir(self.path())
            // Point the config directory into the harness so the host's
            // global config cannot change test behavior.
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            // Keep output assertions free of ANSI escapes.
            .env("NO_COLOR", "1")
            .env_remove("CLICOLOR_FORCE")
            .env_remove("REQCTL_ALLOW_FQDN")
            .env_remove("REQCTL_RESOLVE_TIMEOUT_SECS")
            .env_remove("REQCTL_FORMAT");
        command
    }
}

/// Decode captured stdout for assertions.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Decode captured stderr for assertions.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
