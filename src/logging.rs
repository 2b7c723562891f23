// Route `tracing` output to the browser console.
use std::io;

use tracing::Level;
use yew_pull_gesture::util::clog;

/// Buffers one formatted event and hands it to `console.log` when dropped.
#[derive(Default)]
struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(line) = take_line(&mut self.buf) {
            clog(&line);
        }
        Ok(())
    }
}

// Drain the buffer into one console line without the trailing newline.
fn take_line(buf: &mut Vec<u8>) -> Option<String> {
    if buf.is_empty() {
        return None;
    }
    let line = String::from_utf8_lossy(buf).trim_end().to_string();
    buf.clear();
    Some(line)
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

pub fn init() {
    let installed = tracing_subscriber::fmt()
        .with_writer(ConsoleWriter::default)
        .with_ansi(false)
        .without_time()
        .with_max_level(Level::DEBUG)
        .try_init();
    if let Err(err) = installed {
        clog(&format!("logging unavailable: {}", err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_event_becomes_one_trimmed_line() {
        let mut buf = b" DEBUG yew_pull_gesture::hub: gesture family destroyed family=AutoLoad\n".to_vec();
        assert_eq!(
            take_line(&mut buf).as_deref(),
            Some(" DEBUG yew_pull_gesture::hub: gesture family destroyed family=AutoLoad")
        );
        assert!(buf.is_empty());
        assert_eq!(take_line(&mut buf), None);
    }
}
