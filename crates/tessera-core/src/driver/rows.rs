use super::Cx;
use crate::{stmt::Value, Error, Result};

use std::{collections::VecDeque, fmt, pin::Pin};
use tokio_stream::{Stream, StreamExt};

type DynStream = Pin<Box<dyn Stream<Item = Result<Vec<Value>>> + Send + 'static>>;

/// Cursor over the rows of a query.
///
/// Call [`next`](Rows::next) to advance, then [`scan`](Rows::scan) to move
/// the current row into caller-owned slots.
pub struct Rows {
    cx: Cx,
    source: Source,
    current: Option<Vec<Value>>,
}

enum Source {
    Buffered(VecDeque<Vec<Value>>),
    Stream(DynStream),
    Closed,
}

impl Rows {
    /// Rows read lazily from a stream. Each fetch races against `cx`.
    pub fn from_stream<T>(cx: &Cx, stream: T) -> Rows
    where
        T: Stream<Item = Result<Vec<Value>>> + Send + 'static,
    {
        Rows {
            cx: cx.clone(),
            source: Source::Stream(Box::pin(stream)),
            current: None,
        }
    }

    /// Rows that are already in memory.
    pub fn from_vec(cx: &Cx, rows: Vec<Vec<Value>>) -> Rows {
        Rows {
            cx: cx.clone(),
            source: Source::Buffered(rows.into()),
            current: None,
        }
    }

    /// Advances to the next row. Returns `false` once the rows are exhausted.
    pub async fn next(&mut self) -> Result<bool> {
        self.current = match &mut self.source {
            Source::Buffered(rows) => {
                self.cx.check()?;
                rows.pop_front()
            }
            Source::Stream(stream) => self.cx.run(async { stream.next().await.transpose() }).await?,
            Source::Closed => None,
        };

        if self.current.is_none() {
            self.close();
            return Ok(false);
        }

        Ok(true)
    }

    /// Moves the current row into `slots`, which must have one entry per
    /// column.
    ///
    /// The row is consumed: scanning it a second time fails until `next`
    /// advances to another row.
    pub fn scan(&mut self, slots: &mut [Value]) -> Result<()> {
        let Some(row) = self.current.take() else {
            return Err(Error::invalid_argument(
                "scan called without a current row, or the row was already scanned",
            ));
        };

        if row.len() != slots.len() {
            let err = Error::invalid_argument(format!(
                "row has {} columns, but {} slots were provided",
                row.len(),
                slots.len()
            ));
            self.current = Some(row);
            return Err(err);
        }

        for (slot, value) in slots.iter_mut().zip(row) {
            *slot = value;
        }

        Ok(())
    }

    /// Releases the underlying stream. Further calls to `next` return
    /// `false`.
    pub fn close(&mut self) {
        self.source = Source::Closed;
        self.current = None;
    }

    /// Reads all remaining rows.
    pub async fn collect(mut self) -> Result<Vec<Vec<Value>>> {
        let mut ret = vec![];

        while self.next().await? {
            if let Some(row) = self.current.take() {
                ret.push(row);
            }
        }

        Ok(ret)
    }
}

impl fmt::Debug for Rows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            Source::Buffered(rows) => format!("Buffered({})", rows.len()),
            Source::Stream(_) => "Stream".to_string(),
            Source::Closed => "Closed".to_string(),
        };

        f.debug_struct("Rows")
            .field("source", &source)
            .field("current", &self.current)
            .finish()
    }
}
