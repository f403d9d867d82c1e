//! Opening rendered figures: each image is handed to a viewer without waiting,
//! then `wait` blocks until every viewer has exited.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::{Child, Command};

use crate::error::{Result, UqError};

pub struct Viewer {
    program: String,
    args: Vec<String>,
    children: Vec<(PathBuf, Child)>,
}

impl Viewer {
    /// `custom` is a whitespace-separated command line; the image path is appended.
    pub fn new(custom: Option<&str>) -> Self {
        let mut parts: Vec<String> = match custom.map(str::trim).filter(|s| !s.is_empty()) {
            Some(cmd) => cmd.split_whitespace().map(str::to_string).collect(),
            None => platform_opener(),
        };
        let program = parts.remove(0);
        Self {
            program,
            args: parts,
            children: Vec::new(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Spawn the viewer for `image` and return immediately.
    pub fn open(&mut self, image: &Path) -> Result<()> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(image)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| UqError::Viewer {
                viewer: self.program.clone(),
                source,
            })?;
        tracing::debug!(viewer = %self.program, image = %image.display(), "viewer spawned");
        self.children.push((image.to_path_buf(), child));
        Ok(())
    }

    pub fn pending(&self) -> usize {
        self.children.len()
    }

    /// Block until every spawned viewer has exited.
    pub async fn wait(&mut self) -> Result<()> {
        for (image, mut child) in self.children.drain(..) {
            match child.wait().await {
                Ok(status) if !status.success() => {
                    tracing::warn!(image = %image.display(), %status, "viewer exited with failure");
                }
                Ok(_) => {}
                Err(source) => {
                    return Err(UqError::Viewer {
                        viewer: self.program.clone(),
                        source,
                    })
                }
            }
        }
        Ok(())
    }
}

fn platform_opener() -> Vec<String> {
    if cfg!(windows) {
        ["powershell.exe", "-NoProfile", "-Command", "Start-Process", "-Wait", "-FilePath"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else if cfg!(target_os = "macos") {
        vec!["open".into(), "-W".into()]
    } else {
        vec!["xdg-open".into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_viewer_command_is_split() {
        let v = Viewer::new(Some("feh --scale-down"));
        assert_eq!(v.program(), "feh");
        assert_eq!(v.args, vec!["--scale-down".to_string()]);
    }

    #[test]
    fn blank_custom_viewer_falls_back() {
        let v = Viewer::new(Some("   "));
        assert!(!v.program().is_empty());
        assert_eq!(v.pending(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn wait_blocks_on_all_viewers() {
        let mut v = Viewer::new(Some("true"));
        v.open(Path::new("a.png")).unwrap();
        v.open(Path::new("b.png")).unwrap();
        assert_eq!(v.pending(), 2);
        v.wait().await.unwrap();
        assert_eq!(v.pending(), 0);
    }
}
