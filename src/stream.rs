//! The line-by-line transform.
//!
//! One pass over the input: lines whose first byte is [`COMMENT_MARKER`] are
//! copied through, every other line has its leading coordinate columns
//! rewritten in place while the rest of the line is reproduced byte for byte.
//! Nothing in the stream itself can abort the pass; a token that does not
//! parse as a number degrades to zero and processing continues.

use std::io::{self, BufRead, Write};

use glam::DVec3;

use crate::SimBox;

/// Lines starting with this byte pass through without modification.
pub const COMMENT_MARKER: u8 = b'#';

/// The streaming transform: classify, parse, wrap, emit.
#[derive(Debug, Clone)]
pub struct PbcFilter {
    simbox: SimBox,
    ndim: usize,
}

impl PbcFilter {
    pub fn new(simbox: SimBox) -> Self {
        let ndim = simbox.ndim();
        Self { simbox, ndim }
    }

    /// Scan the leading coordinate columns of a data line.
    ///
    /// Returns the parsed position and the byte offset where the opaque
    /// suffix begins. One token is consumed per active axis, together with
    /// the whitespace run that delimits it from the suffix; a malformed or
    /// missing token parses as zero.
    fn scan_coordinates(&self, line: &[u8]) -> (DVec3, usize) {
        let mut position = DVec3::ZERO;
        let mut at = 0;
        for axis in 0..self.ndim {
            while at < line.len() && line[at].is_ascii_whitespace() {
                at += 1;
            }
            let start = at;
            while at < line.len() && !line[at].is_ascii_whitespace() {
                at += 1;
            }
            position[axis] = std::str::from_utf8(&line[start..at])
                .ok()
                .and_then(|token| token.parse().ok())
                .unwrap_or(0.0);
        }
        while at < line.len() && line[at].is_ascii_whitespace() {
            at += 1;
        }
        (position, at)
    }

    /// Transform one line (already stripped of its terminator) and write it,
    /// including the trailing line feed, to `out`.
    pub fn rewrite_line<W: Write>(&self, line: &[u8], out: &mut W) -> io::Result<()> {
        if line.first() == Some(&COMMENT_MARKER) {
            out.write_all(line)?;
            return out.write_all(b"\n");
        }

        let (position, suffix_start) = self.scan_coordinates(line);
        let wrapped = self.simbox.apply_pbc(position);

        for axis in 0..self.ndim {
            write!(out, "{} ", wrapped[axis])?;
        }
        out.write_all(&line[suffix_start..])?;
        out.write_all(b"\n")
    }

    /// Run the whole stream through the transform, one line in, one line
    /// out, until the reader is exhausted. Returns the number of lines
    /// processed.
    ///
    /// Input terminators (`\n` or `\r\n`, or none on the final line) are
    /// normalized to a single line feed on output.
    pub fn process<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> io::Result<usize> {
        let mut line = Vec::new();
        let mut nlines = 0;
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            if line.last() == Some(&b'\n') {
                line.pop();
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
            }
            self.rewrite_line(&line, &mut writer)?;
            nlines += 1;
        }
        Ok(nlines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(filter: &PbcFilter, line: &[u8]) -> String {
        let mut out = Vec::new();
        filter.rewrite_line(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn cubic(l: f64) -> PbcFilter {
        PbcFilter::new(SimBox::new(DVec3::splat(l)))
    }

    #[test]
    fn comments_pass_through() {
        let filter = cubic(10.0);
        assert_eq!(rewrite(&filter, b"# 7 -6 12 not data"), "# 7 -6 12 not data\n");
        assert_eq!(rewrite(&filter, b"#"), "#\n");
    }

    #[test]
    fn wraps_the_leading_columns() {
        let filter = cubic(10.0);
        assert_eq!(rewrite(&filter, b"7 -6 12 foo"), "-3 4 2 foo\n");
    }

    #[test]
    fn suffix_is_preserved_verbatim() {
        let filter = cubic(100.0);
        assert_eq!(rewrite(&filter, b"1.0 2.0 3.0 99 red"), "1 2 3 99 red\n");
        // Inner suffix whitespace is opaque, only the delimiter run after
        // the last coordinate is consumed.
        assert_eq!(rewrite(&filter, b"1 2 3   99  red"), "1 2 3 99  red\n");
    }

    #[test]
    fn line_without_suffix_keeps_the_column_separator() {
        let filter = cubic(10.0);
        assert_eq!(rewrite(&filter, b"7 -6 12"), "-3 4 2 \n");
    }

    #[test]
    fn two_dimensional_box_reads_two_columns() {
        let filter = PbcFilter::new(SimBox::new(DVec3::new(10.0, 10.0, -1.0)));
        // The third original column is part of the opaque suffix.
        assert_eq!(rewrite(&filter, b"7 -6 12 foo"), "-3 4 12 foo\n");
    }

    #[test]
    fn malformed_tokens_degrade_to_zero() {
        let filter = cubic(100.0);
        assert_eq!(rewrite(&filter, b"oops 2 3 rest"), "0 2 3 rest\n");
        assert_eq!(rewrite(&filter, b""), "0 0 0 \n");
    }

    #[test]
    fn leading_whitespace_is_consumed() {
        let filter = cubic(10.0);
        assert_eq!(rewrite(&filter, b"  7\t-6 12 foo"), "-3 4 2 foo\n");
    }
}
