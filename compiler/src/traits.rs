use crate::error::WlgenError;

/// Yields the raw bytes of a protocol document, given the name the caller
/// uses for it (a path, a repository path, a URL...).
pub trait ProtocolSource {
    fn fetch(&mut self, name: &str) -> Result<Vec<u8>, WlgenError>;
}

/// Persists one generated header.
pub trait HeaderSink {
    fn write(&mut self, file_name: &str, content: &str) -> Result<(), WlgenError>;
}

impl<S: ProtocolSource + ?Sized> ProtocolSource for &mut S {
    fn fetch(&mut self, name: &str) -> Result<Vec<u8>, WlgenError> {
        (**self).fetch(name)
    }
}

impl<S: HeaderSink + ?Sized> HeaderSink for &mut S {
    fn write(&mut self, file_name: &str, content: &str) -> Result<(), WlgenError> {
        (**self).write(file_name, content)
    }
}
