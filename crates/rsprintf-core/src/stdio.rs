//! Stream convenience wrappers over [`snprintf`].
//!
//! Formatting happens into a fixed stack buffer sized like a stdio
//! buffer; the rendered bytes then go to the writer in one call. The
//! returned length is the logical length of the formatted result, which
//! can exceed what was actually streamed when the result outgrows the
//! buffer.

use std::io::{self, Write};

use crate::args::FormatArg;
use crate::engine::snprintf;

/// Capacity of the staging buffer used by [`printf`] and [`fprintf`].
/// Content beyond `OUTPUT_BUFFER_SIZE - 1` bytes is formatted (and
/// counted) but not streamed.
pub const OUTPUT_BUFFER_SIZE: usize = 8192;

/// Format into an internal buffer and write the result to `writer`.
/// Returns the logical length of the formatted output.
pub fn fprintf(
    writer: &mut dyn Write,
    template: &[u8],
    args: &[FormatArg<'_>],
) -> io::Result<usize> {
    let mut buffer = [0u8; OUTPUT_BUFFER_SIZE];
    let logical = snprintf(&mut buffer, template, args);
    let streamed = logical.min(OUTPUT_BUFFER_SIZE - 1);
    writer.write_all(&buffer[..streamed])?;
    Ok(logical)
}

/// Format and write to standard output.
pub fn printf(template: &[u8], args: &[FormatArg<'_>]) -> io::Result<usize> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let logical = fprintf(&mut handle, template, args)?;
    handle.flush()?;
    Ok(logical)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::FormatArg::{Int, Str};

    #[test]
    fn test_fprintf_streams_formatted_bytes() {
        let mut out = Vec::new();
        let len = fprintf(&mut out, b"hi %d %s", &[Int(5), Str(b"there")]).unwrap();
        assert_eq!(out, b"hi 5 there");
        assert_eq!(len, 10);
    }

    #[test]
    fn test_fprintf_empty_template_writes_nothing() {
        let mut out = Vec::new();
        assert_eq!(fprintf(&mut out, b"", &[]).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_fprintf_reports_logical_length_past_buffer() {
        // A width larger than the staging buffer: the stream receives
        // the buffer's content capacity, the return value the full
        // logical length.
        let mut out = Vec::new();
        let len = fprintf(&mut out, b"%9000d", &[Int(42)]).unwrap();
        assert_eq!(len, 9000);
        assert_eq!(out.len(), OUTPUT_BUFFER_SIZE - 1);
        assert!(out.iter().take(100).all(|&b| b == b' '));
        assert!(out.ends_with(b" "));
    }

    #[test]
    fn test_fprintf_propagates_writer_errors() {
        struct FailingWriter;
        impl std::io::Write for FailingWriter {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let err = fprintf(&mut FailingWriter, b"x", &[]).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    }
}
