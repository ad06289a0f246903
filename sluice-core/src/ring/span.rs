//! Contiguous read spans within the circular store

use heapless::Vec;

/// Maximum spans a single drain can produce
///
/// One span when the write position has not wrapped since the last drain,
/// two when it has: tail of the store first, then the head.
pub const MAX_SPANS: usize = 2;

/// A contiguous run of bytes inside the store
///
/// A span never crosses the capacity boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Span {
    /// Physical offset of the first byte
    pub offset: usize,
    /// Number of bytes
    pub len: usize,
}

impl Span {
    /// Create a new span
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Offset one past the last byte
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Check if the span covers no bytes
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Ordered spans produced by one drain
///
/// Spans must be consumed in the order they are stored; reversing a wrapped
/// pair would reorder the stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Spans {
    inner: Vec<Span, MAX_SPANS>,
}

impl Spans {
    /// Create an empty span list
    pub const fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// A single unwrapped span
    pub(crate) fn single(span: Span) -> Self {
        let mut spans = Self::new();
        spans.push(span);
        spans
    }

    /// A wrapped pair: `tail` (up to the capacity boundary) then `head`
    pub(crate) fn wrapped(tail: Span, head: Span) -> Self {
        let mut spans = Self::new();
        spans.push(tail);
        spans.push(head);
        spans
    }

    /// Append a span, skipping empty ones
    fn push(&mut self, span: Span) {
        if !span.is_empty() {
            // Capacity is MAX_SPANS and only the constructors above push
            let _ = self.inner.push(span);
        }
    }

    /// Number of spans (0, 1 or 2)
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if there is nothing to drain
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Check if the drain was split at the capacity boundary
    pub fn is_split(&self) -> bool {
        self.inner.len() == MAX_SPANS
    }

    /// Total bytes across all spans
    pub fn total_len(&self) -> usize {
        self.inner.iter().map(|s| s.len).sum()
    }

    /// Iterate spans in stream order
    pub fn iter(&self) -> core::slice::Iter<'_, Span> {
        self.inner.iter()
    }

    /// Spans as a slice, in stream order
    pub fn as_slice(&self) -> &[Span] {
        &self.inner
    }
}

impl<'a> IntoIterator for &'a Spans {
    type Item = &'a Span;
    type IntoIter = core::slice::Iter<'a, Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_pair_order() {
        let spans = Spans::wrapped(Span::new(6, 2), Span::new(0, 2));

        assert_eq!(spans.len(), 2);
        assert!(spans.is_split());
        assert_eq!(spans.total_len(), 4);
        assert_eq!(spans.as_slice(), &[Span::new(6, 2), Span::new(0, 2)]);
    }

    #[test]
    fn test_empty_head_is_dropped() {
        // Wrapped exactly onto offset 0: nothing to read from the head
        let spans = Spans::wrapped(Span::new(5, 3), Span::new(0, 0));

        assert_eq!(spans.len(), 1);
        assert!(!spans.is_split());
        assert_eq!(spans.as_slice(), &[Span::new(5, 3)]);
    }

    #[test]
    fn test_span_end() {
        let span = Span::new(2, 4);
        assert_eq!(span.end(), 6);
        assert!(!span.is_empty());
        assert!(Span::new(3, 0).is_empty());
    }
}
