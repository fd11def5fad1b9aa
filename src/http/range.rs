//! HTTP Range request parsing module
//!
//! Single-range `bytes=` parsing per RFC 7233. Multi-range requests and
//! malformed headers are ignored and answered with the full content.

/// A satisfiable byte range within a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte position
    pub start: usize,
    /// Last byte position, `None` for an open-ended range
    pub end: Option<usize>,
}

impl ByteRange {
    /// Resolve the inclusive end position against the file size
    #[inline]
    pub fn end_position(&self, file_size: usize) -> usize {
        self.end.unwrap_or_else(|| file_size.saturating_sub(1))
    }
}

/// Range header parse outcome
#[derive(Debug)]
pub enum RangeOutcome {
    /// Satisfiable range, serve a 206
    Range(ByteRange),
    /// Syntactically valid but unsatisfiable, serve a 416
    Unsatisfiable,
    /// No header, not a bytes unit, or malformed: serve the full content
    Ignore,
}

/// Parse an HTTP Range header against a known file size
///
/// Accepted forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
pub fn parse_range_header(range_header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(header) = range_header else {
        return RangeOutcome::Ignore;
    };

    let Some(ranges) = header.strip_prefix("bytes=") else {
        return RangeOutcome::Ignore;
    };

    // Single range only
    if ranges.contains(',') {
        return RangeOutcome::Ignore;
    }

    let Some((start_part, end_part)) = ranges.split_once('-') else {
        return RangeOutcome::Ignore;
    };
    let (start_part, end_part) = (start_part.trim(), end_part.trim());

    if start_part.is_empty() {
        return parse_suffix(end_part, file_size);
    }

    let Ok(start) = start_part.parse::<usize>() else {
        return RangeOutcome::Ignore;
    };
    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_part.is_empty() {
        None
    } else {
        match end_part.parse::<usize>() {
            // Ends past the file are clamped, not rejected
            Ok(e) => Some(e.min(file_size - 1)),
            Err(_) => return RangeOutcome::Ignore,
        }
    };

    if end.is_some_and(|e| start > e) {
        return RangeOutcome::Unsatisfiable;
    }

    RangeOutcome::Range(ByteRange { start, end })
}

/// Parse a suffix range (`-500` means the last 500 bytes)
fn parse_suffix(suffix_part: &str, file_size: usize) -> RangeOutcome {
    let Ok(suffix) = suffix_part.parse::<usize>() else {
        return RangeOutcome::Ignore;
    };

    if suffix == 0 {
        return RangeOutcome::Unsatisfiable;
    }

    // A suffix longer than the file just means the whole file
    RangeOutcome::Range(ByteRange {
        start: file_size.saturating_sub(suffix),
        end: Some(file_size.saturating_sub(1)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_header() {
        assert!(matches!(parse_range_header(None, 100), RangeOutcome::Ignore));
    }

    #[test]
    fn test_fixed_range() {
        match parse_range_header(Some("bytes=0-9"), 100) {
            RangeOutcome::Range(r) => {
                assert_eq!(r.start, 0);
                assert_eq!(r.end, Some(9));
            }
            other => panic!("expected Range, got {other:?}"),
        }
    }

    #[test]
    fn test_open_range() {
        match parse_range_header(Some("bytes=50-"), 100) {
            RangeOutcome::Range(r) => {
                assert_eq!(r.start, 50);
                assert_eq!(r.end, None);
                assert_eq!(r.end_position(100), 99);
            }
            other => panic!("expected Range, got {other:?}"),
        }
    }

    #[test]
    fn test_suffix_range() {
        match parse_range_header(Some("bytes=-20"), 100) {
            RangeOutcome::Range(r) => {
                assert_eq!(r.start, 80);
                assert_eq!(r.end, Some(99));
            }
            other => panic!("expected Range, got {other:?}"),
        }
    }

    #[test]
    fn test_suffix_longer_than_file() {
        match parse_range_header(Some("bytes=-500"), 100) {
            RangeOutcome::Range(r) => {
                assert_eq!(r.start, 0);
                assert_eq!(r.end, Some(99));
            }
            other => panic!("expected Range, got {other:?}"),
        }
    }

    #[test]
    fn test_end_clamped_to_file_size() {
        match parse_range_header(Some("bytes=90-200"), 100) {
            RangeOutcome::Range(r) => {
                assert_eq!(r.start, 90);
                assert_eq!(r.end, Some(99));
            }
            other => panic!("expected Range, got {other:?}"),
        }
    }

    #[test]
    fn test_unsatisfiable() {
        assert!(matches!(
            parse_range_header(Some("bytes=200-"), 100),
            RangeOutcome::Unsatisfiable
        ));
        assert!(matches!(
            parse_range_header(Some("bytes=-0"), 100),
            RangeOutcome::Unsatisfiable
        ));
        assert!(matches!(
            parse_range_header(Some("bytes=9-3"), 100),
            RangeOutcome::Unsatisfiable
        ));
    }

    #[test]
    fn test_malformed_ignored() {
        assert!(matches!(
            parse_range_header(Some("bytes=a-b"), 100),
            RangeOutcome::Ignore
        ));
        assert!(matches!(
            parse_range_header(Some("bytes=0-9,20-29"), 100),
            RangeOutcome::Ignore
        ));
        assert!(matches!(
            parse_range_header(Some("items=0-9"), 100),
            RangeOutcome::Ignore
        ));
    }
}
