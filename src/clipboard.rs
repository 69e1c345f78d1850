use anyhow::{Context, Result};
use arboard::Clipboard;

/// Hidden argument that turns the binary into a clipboard holder process.
pub const HOLDER_FLAG: &str = "__cjkcount_clipboard_holder";

/// On Linux the selection dies with the process that owns it, so the report
/// is handed to a detached copy of ourselves that keeps serving it.
#[cfg(target_os = "linux")]
fn hold_clipboard_from_stdin() -> Result<()> {
    use arboard::SetExtLinux;

    let text = std::io::read_to_string(std::io::stdin())?;
    let mut clipboard = Clipboard::new()?;
    // wait() blocks until another program takes ownership of the selection
    clipboard.set().wait().text(text)?;
    Ok(())
}

/// Returns `Ok(true)` when this process was started as a clipboard holder and
/// has finished serving; the caller should exit right away.
pub fn run_holder_if_requested() -> Result<bool> {
    if !std::env::args().any(|a| a == HOLDER_FLAG) {
        return Ok(false);
    }
    #[cfg(target_os = "linux")]
    hold_clipboard_from_stdin()?;
    #[cfg(not(target_os = "linux"))]
    log::warn!("{HOLDER_FLAG} is only used on Linux; ignoring");
    Ok(true)
}

pub fn copy_report(text: &str) -> Result<()> {
    #[cfg(not(target_os = "linux"))]
    {
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text.to_owned())?;
    }

    #[cfg(target_os = "linux")]
    {
        use std::io::Write;
        use std::process::{Command, Stdio};

        let mut child = Command::new(std::env::current_exe()?)
            .arg(HOLDER_FLAG)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .current_dir("/")
            .spawn()
            .context("failed to start clipboard holder")?;

        let mut stdin = child
            .stdin
            .take()
            .context("clipboard holder has no stdin")?;
        stdin.write_all(text.as_bytes())?;
        stdin.flush()?;
    }

    log::debug!("copied {} bytes to the clipboard", text.len());
    Ok(())
}
