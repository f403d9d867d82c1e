//! Simulation command construction and shell execution.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;

use crate::case::CaseNumber;
use crate::error::{Result, UqError};

/// One invocation of the simulation executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimCommand {
    pub program: String,
    pub case: CaseNumber,
    pub aleatory: PathBuf,
    pub epistemic: PathBuf,
    pub design: PathBuf,
}

impl SimCommand {
    pub fn new(
        program: impl Into<String>,
        case: CaseNumber,
        aleatory: impl Into<PathBuf>,
        epistemic: impl Into<PathBuf>,
        design: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            case,
            aleatory: aleatory.into(),
            epistemic: epistemic.into(),
            design: design.into(),
        }
    }

    /// Render `<program> <case> "<aleatory>" "<epistemic>" "<design>"`.
    pub fn command_line(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.program,
            self.case,
            quote(&self.aleatory),
            quote(&self.epistemic),
            quote(&self.design)
        )
    }
}

/// Double-quote a path for the platform shell.
fn quote(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for ch in raw.chars() {
        if cfg!(not(windows)) && matches!(ch, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Program and arguments used to hand `cmd` to the platform shell.
///
/// On Windows: PowerShell if requested via `shell_name` or if PSModulePath is set, otherwise cmd.exe.
/// On Unix-like systems: the shell named by SHELL, or /bin/sh as fallback.
pub fn shell_invocation(cmd: &str, shell_name: &str) -> (String, Vec<String>) {
    if cfg!(windows) {
        let override_shell = shell_name.to_ascii_lowercase();
        let prefer_ps = if override_shell.contains("powershell") || override_shell.contains("pwsh") {
            true
        } else if override_shell.contains("cmd") {
            false
        } else {
            // Fallback heuristic: if PSModulePath exists, prefer PowerShell; otherwise cmd
            !std::env::var("PSModulePath").unwrap_or_default().is_empty()
        };
        if prefer_ps {
            (
                "powershell.exe".into(),
                vec!["-NoLogo".into(), "-NoProfile".into(), "-Command".into(), cmd.into()],
            )
        } else {
            ("cmd.exe".into(), vec!["/c".into(), cmd.into()])
        }
    } else {
        let shell = std::env::var("SHELL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "/bin/sh".into());
        (shell, vec!["-c".into(), cmd.into()])
    }
}

/// How the simulation process ended.
#[derive(Debug, Clone, Copy)]
pub struct SimExit {
    pub status: ExitStatus,
}

impl SimExit {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }
}

/// Run `cmd` through the platform shell in `workdir` and wait for it to exit.
///
/// The exit status is returned, not judged; callers decide whether a failure matters.
pub async fn run_command(
    cmd: &str,
    workdir: &Path,
    shell_name: &str,
    timeout: Option<Duration>,
) -> Result<SimExit> {
    let (program, args) = shell_invocation(cmd, shell_name);
    tracing::debug!(shell = %program, workdir = %workdir.display(), "spawning `{cmd}`");

    let mut child = Command::new(&program)
        .args(&args)
        .current_dir(workdir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| UqError::Spawn {
            command: cmd.to_string(),
            source,
        })?;

    let waited = match timeout {
        Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
            Ok(res) => res,
            Err(_) => {
                let _ = child.kill().await;
                return Err(UqError::Timeout {
                    command: cmd.to_string(),
                    limit,
                });
            }
        },
        None => child.wait().await,
    };

    let status = waited.map_err(|source| UqError::Spawn {
        command: cmd.to_string(),
        source,
    })?;
    Ok(SimExit { status })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> SimCommand {
        SimCommand::new(
            "uqsim",
            CaseNumber::default(),
            "aleatory.dat",
            "epistemic.dat",
            "design.dat",
        )
    }

    #[test]
    fn test_reference_command_line() {
        assert_eq!(
            reference().command_line(),
            r#"uqsim 7 "aleatory.dat" "epistemic.dat" "design.dat""#
        );
    }

    #[test]
    fn test_case_and_program_are_embedded() {
        let mut cmd = reference();
        cmd.program = "/opt/uq/bin/uqsim".into();
        cmd.case = CaseNumber::new(2).unwrap();
        cmd.design = PathBuf::from("inputs/my design.dat");
        assert_eq!(
            cmd.command_line(),
            r#"/opt/uq/bin/uqsim 2 "aleatory.dat" "epistemic.dat" "inputs/my design.dat""#
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_specials_are_escaped() {
        assert_eq!(quote(Path::new(r#"a"$b`.dat"#)), r#""a\"\$b\`.dat""#);
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_shell_invocation() {
        let (_, args) = shell_invocation("uqsim 7", "auto");
        assert_eq!(args, vec!["-c".to_string(), "uqsim 7".to_string()]);
    }
}
