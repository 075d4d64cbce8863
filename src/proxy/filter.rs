//! Proxy filters
//!
//! A filter sees every buffer passing through the proxy in one direction and
//! may replace it. Filters are told when connections open and close.

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::connection::ConnectionDetails;
use crate::common::fs::ensure_parent_dir;
use crate::error::{GrinderError, Result};

pub trait Filter: Send + fmt::Debug {
    /// Name shown in the proxy startup summary
    fn name(&self) -> &str;

    fn connection_opened(&mut self, _connection: &ConnectionDetails) -> Result<()> {
        Ok(())
    }

    fn connection_closed(&mut self, _connection: &ConnectionDetails) -> Result<()> {
        Ok(())
    }

    /// Process one buffer. `None` leaves the buffer unchanged.
    fn handle(&mut self, connection: &ConnectionDetails, buffer: &[u8]) -> Result<Option<Vec<u8>>>;
}

/// Writer shared by every filter of one proxy run
#[derive(Clone)]
pub struct FilterOutput {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl fmt::Debug for FilterOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterOutput").finish_non_exhaustive()
    }
}

impl FilterOutput {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Output discarding everything written to it
    pub fn sink() -> Self {
        Self::new(io::sink())
    }

    /// Create (or truncate) `path`, creating its parent directory on demand.
    pub fn create(path: &Path) -> io::Result<Self> {
        ensure_parent_dir(path)?;
        Ok(Self::new(File::create(path)?))
    }

    pub fn write_all(&self, bytes: &[u8]) -> Result<()> {
        let mut writer = self.inner.lock().map_err(|_| GrinderError::IoError {
            message: "filter output lock poisoned".to_string(),
        })?;
        writer.write_all(bytes)?;
        writer.flush()?;
        Ok(())
    }
}

/// Leaves every buffer untouched and writes nothing
#[derive(Debug, Default)]
pub struct NullFilter;

impl Filter for NullFilter {
    fn name(&self) -> &str {
        "NullFilter"
    }

    fn handle(&mut self, _connection: &ConnectionDetails, _buffer: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }
}

/// Echoes connection events and content to the filter output
#[derive(Debug)]
pub struct EchoFilter {
    output: FilterOutput,
}

impl EchoFilter {
    pub fn new(output: FilterOutput) -> Self {
        Self { output }
    }
}

/// Printable ASCII and line breaks pass through; other bytes become `[XX]`.
fn render(buffer: &[u8]) -> String {
    let mut rendered = String::with_capacity(buffer.len());
    for &byte in buffer {
        match byte {
            b'\n' | b'\r' | b'\t' | 0x20..=0x7e => rendered.push(char::from(byte)),
            _ => rendered.push_str(&format!("[{byte:02X}]")),
        }
    }
    rendered
}

impl Filter for EchoFilter {
    fn name(&self) -> &str {
        "EchoFilter"
    }

    fn connection_opened(&mut self, connection: &ConnectionDetails) -> Result<()> {
        self.output
            .write_all(format!("--- {connection} opened --\n").as_bytes())
    }

    fn connection_closed(&mut self, connection: &ConnectionDetails) -> Result<()> {
        self.output
            .write_all(format!("--- {connection} closed --\n").as_bytes())
    }

    fn handle(&mut self, connection: &ConnectionDetails, buffer: &[u8]) -> Result<Option<Vec<u8>>> {
        let text = format!("------ {connection} ------\n{}\n", render(buffer));
        self.output.write_all(text.as_bytes())?;
        Ok(None)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::proxy::connection::EndPoint;

    /// In-memory writer whose contents stay readable after being boxed.
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuffer(pub Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    pub(crate) fn connection() -> ConnectionDetails {
        ConnectionDetails::new(
            EndPoint::new("localhost", 8001),
            EndPoint::new("example.org", 80),
            false,
        )
    }

    #[test]
    fn test_null_filter_leaves_buffer_unchanged() {
        let mut filter = NullFilter;
        assert_eq!(filter.handle(&connection(), b"GET / HTTP/1.1").unwrap(), None);
    }

    #[test]
    fn test_echo_filter_writes_header_and_content() {
        let buffer = SharedBuffer::default();
        let mut filter = EchoFilter::new(FilterOutput::new(buffer.clone()));

        let result = filter.handle(&connection(), b"GET /\x01\xff").unwrap();

        assert_eq!(result, None);
        assert_eq!(
            buffer.contents(),
            "------ localhost:8001->example.org:80 ------\nGET /[01][FF]\n"
        );
    }

    #[test]
    fn test_echo_filter_reports_connection_events() {
        let buffer = SharedBuffer::default();
        let mut filter = EchoFilter::new(FilterOutput::new(buffer.clone()));

        filter.connection_opened(&connection()).unwrap();
        filter.connection_closed(&connection()).unwrap();

        let contents = buffer.contents();
        assert!(contents.contains("localhost:8001->example.org:80 opened"));
        assert!(contents.contains("localhost:8001->example.org:80 closed"));
    }

    #[test]
    fn test_filter_output_creates_parent_directory() {
        let temp = crate::test_fixtures::create_temp_dir();
        let path = temp.path().join("target/grinder/tcpproxy/grinder.py");

        let output = FilterOutput::create(&path).unwrap();
        output.write_all(b"# recorded\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# recorded\n");
    }
}
