use std::fs;
use std::path::PathBuf;

use tracing::debug;
use wlgen_compiler::error::WlgenError;
use wlgen_compiler::traits::{HeaderSink, ProtocolSource};

/// Reads protocol documents from the local filesystem; names are paths.
pub struct FsSource;

impl ProtocolSource for FsSource {
    fn fetch(&mut self, name: &str) -> Result<Vec<u8>, WlgenError> {
        debug!(path = %name, "reading protocol XML");
        Ok(fs::read(name)?)
    }
}

/// Writes each header into `dir`, creating the directory on first use.
pub struct DirSink {
    pub dir: PathBuf,
}

impl HeaderSink for DirSink {
    fn write(&mut self, file_name: &str, content: &str) -> Result<(), WlgenError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, content)?;
        println!("{} created!", path.display());
        Ok(())
    }
}

/// Prints headers instead of writing them.
pub struct StdoutSink;

impl HeaderSink for StdoutSink {
    fn write(&mut self, _file_name: &str, content: &str) -> Result<(), WlgenError> {
        print!("{}", content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_sink_creates_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = DirSink { dir: tmp.path().join("out") };
        sink.write("demo_protocol.hpp", "// header\n").unwrap();
        let written = fs::read_to_string(tmp.path().join("out").join("demo_protocol.hpp")).unwrap();
        assert_eq!(written, "// header\n");
    }

    #[test]
    fn fs_source_reports_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.xml");
        let err = FsSource.fetch(&missing.to_string_lossy()).unwrap_err();
        assert!(matches!(err, WlgenError::Io(_)), "got {:?}", err);
    }
}
