use std::io;

use tracing::level_filters::LevelFilter;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Parse a level name such as `"debug"` or `"WARN"`; anything unrecognised falls back to `info`.
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    level
        .and_then(|name| name.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::INFO)
}

/// Install a global `tracing` subscriber that prints to the browser console. Returns `false` if a
/// subscriber was already installed.
pub fn install_console_subscriber(max_level: LevelFilter) -> bool {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .without_time()
        .with_target(false)
        .with_writer(Console)
        .finish();
    tracing::subscriber::set_global_default(subscriber).is_ok()
}

/// Browser console method an event is printed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Log,
    Debug,
}

impl From<Level> for ConsoleMethod {
    fn from(level: Level) -> Self {
        if level == Level::ERROR {
            ConsoleMethod::Error
        } else if level == Level::WARN {
            ConsoleMethod::Warn
        } else if level == Level::INFO {
            ConsoleMethod::Info
        } else if level == Level::DEBUG {
            ConsoleMethod::Log
        } else {
            ConsoleMethod::Debug
        }
    }
}

/// Hands the fmt layer one [`ConsoleWriter`] per event, tagged with that event's level.
struct Console;

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and prints it on drop.
struct ConsoleWriter {
    method: ConsoleMethod,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            method: level.into(),
            buffer: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buffer);
        let message = wasm_bindgen::JsValue::from_str(line.trim_end());
        match self.method {
            ConsoleMethod::Error => web_sys::console::error_1(&message),
            ConsoleMethod::Warn => web_sys::console::warn_1(&message),
            ConsoleMethod::Info => web_sys::console::info_1(&message),
            ConsoleMethod::Log => web_sys::console::log_1(&message),
            ConsoleMethod::Debug => web_sys::console::debug_1(&message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels() {
        assert_eq!(parse_level(Some("debug")), LevelFilter::DEBUG);
        assert_eq!(parse_level(Some(" WARN ")), LevelFilter::WARN);
        assert_eq!(parse_level(Some("off")), LevelFilter::OFF);
        assert_eq!(parse_level(Some("chatty")), LevelFilter::INFO);
        assert_eq!(parse_level(None), LevelFilter::INFO);
    }

    #[test]
    fn levels_map_to_console_methods() {
        assert_eq!(ConsoleMethod::from(Level::ERROR), ConsoleMethod::Error);
        assert_eq!(ConsoleMethod::from(Level::WARN), ConsoleMethod::Warn);
        assert_eq!(ConsoleMethod::from(Level::INFO), ConsoleMethod::Info);
        assert_eq!(ConsoleMethod::from(Level::DEBUG), ConsoleMethod::Log);
        assert_eq!(ConsoleMethod::from(Level::TRACE), ConsoleMethod::Debug);
    }

    #[test]
    fn writer_takes_level_from_metadata_not_text() {
        let _guard = tracing::subscriber::set_default(tracing_subscriber::registry());
        let span = tracing::warn_span!("INFO looks like a level");
        let meta = span.metadata().expect("registry enables every span");

        // Nothing is written, so dropping the writer never reaches the console.
        let writer = Console.make_writer_for(meta);
        assert_eq!(writer.method, ConsoleMethod::Warn);
        assert_eq!(Console.make_writer().method, ConsoleMethod::Info);
    }
}
