use crate::error::Result;

/// Places a finished export document on the system clipboard.
/// - macOS: pbcopy
/// - Linux: xclip, falling back to xsel
/// - Windows: clip.exe
///
/// Failure is reported, not fatal: the caller falls back to presenting the
/// raw text for manual copying.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        pipe_through("pbcopy", &[], text)
    }

    #[cfg(target_os = "linux")]
    {
        pipe_through("xclip", &["-selection", "clipboard"], text)
            .or_else(|_| pipe_through("xsel", &["--clipboard", "--input"], text))
    }

    #[cfg(target_os = "windows")]
    {
        pipe_through("clip", &[], text)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = text;
        Err(crate::error::JotterError::Clipboard(
            "Clipboard not supported on this platform".to_string(),
        ))
    }
}

#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
fn pipe_through(program: &str, args: &[&str], text: &str) -> Result<()> {
    use crate::error::JotterError;
    use std::io::Write;
    use std::process::{Command, Stdio};

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| JotterError::Clipboard(format!("Failed to spawn {program}: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| JotterError::Clipboard(format!("Failed to write to {program}: {e}")))?;
    }

    let status = child
        .wait()
        .map_err(|e| JotterError::Clipboard(format!("Failed to wait for {program}: {e}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(JotterError::Clipboard(format!(
            "{program} exited with error"
        )))
    }
}

/// Formats a single note for the manual-copy fallback
/// (title + blank line + content).
pub fn format_note(title: &str, content: &str) -> String {
    if content.is_empty() {
        format!("{}\n\n", title)
    } else {
        format!("{}\n\n{}", title, content)
    }
}
