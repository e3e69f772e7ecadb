//! Buffered reader and file line sources.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::SourceError;

/// Reads lines from any buffered reader.
///
/// `\n`, `\r\n` and a lone `\r` all end a line and are stripped. Lines must
/// be valid UTF-8. After the first read error the source is exhausted.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    line: usize,
    failed: bool,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            failed: false,
        }
    }

    /// Read the bytes of the next line without its terminator.
    fn read_raw_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let mut read_any = false;
        loop {
            let (terminator, used) = {
                let available = match self.reader.fill_buf() {
                    Ok(buf) => buf,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                };
                if available.is_empty() {
                    return Ok(read_any.then_some(line));
                }
                read_any = true;
                match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                    Some(i) => {
                        line.extend_from_slice(&available[..i]);
                        (Some(available[i]), i + 1)
                    }
                    None => {
                        line.extend_from_slice(available);
                        (None, available.len())
                    }
                }
            };
            self.reader.consume(used);

            match terminator {
                Some(b'\r') => {
                    self.skip_line_feed()?;
                    return Ok(Some(line));
                }
                Some(_) => return Ok(Some(line)),
                None => {}
            }
        }
    }

    /// Consume a `\n` directly following a `\r`, even across buffer refills.
    fn skip_line_feed(&mut self) -> io::Result<()> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => {
                    if buf.first() == Some(&b'\n') {
                        self.reader.consume(1);
                    }
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: BufRead> Iterator for ReaderSource<R> {
    type Item = Result<String, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let decoded = self.read_raw_line().and_then(|raw| {
            raw.map(|bytes| {
                String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            })
            .transpose()
        });

        match decoded {
            Ok(Some(line)) => {
                self.line += 1;
                Some(Ok(line))
            }
            Ok(None) => None,
            Err(source) => {
                self.failed = true;
                Some(Err(SourceError::Read {
                    line: self.line,
                    source,
                }))
            }
        }
    }
}

/// Open a file as a line source.
pub fn open_file(path: &Path) -> Result<ReaderSource<BufReader<File>>, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Opened {}", path.display());
    Ok(ReaderSource::new(BufReader::new(file)))
}
