//! Line sources feeding the parser.

mod reader;

pub use reader::{open_file, ReaderSource};

use crate::error::SourceError;

/// Pull interface over a sequence of raw lines.
///
/// `None` signals end of input. An `Err` item is a failure of the
/// underlying source, not of the line's content.
pub trait LineSource {
    /// Next line without its terminator, or `None` at end of input.
    fn next_line(&mut self) -> Option<Result<String, SourceError>>;
}

impl<I> LineSource for I
where
    I: Iterator<Item = Result<String, SourceError>>,
{
    fn next_line(&mut self) -> Option<Result<String, SourceError>> {
        self.next()
    }
}

/// In-memory lines that can never fail.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    inner: I,
}

impl<I: Iterator> IterSource<I> {
    pub fn new<L>(lines: L) -> Self
    where
        L: IntoIterator<IntoIter = I>,
    {
        Self {
            inner: lines.into_iter(),
        }
    }
}

impl<I, S> Iterator for IterSource<I>
where
    I: Iterator<Item = S>,
    S: Into<String>,
{
    type Item = Result<String, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|line| Ok(line.into()))
    }
}
