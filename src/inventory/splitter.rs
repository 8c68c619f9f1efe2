//! Splits back-to-back JSON objects into separate records
//!
//! `go list -m -json` prints one object per module with nothing but
//! whitespace in between. The splitter tracks brace depth, ignoring braces
//! inside string literals, and yields a record each time depth returns to
//! zero.

/// Lazy iterator over the records of a concatenated-JSON buffer
pub struct RecordSplitter<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> RecordSplitter<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }
}

impl<'a> Iterator for RecordSplitter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let mut depth: usize = 0;
        let mut in_string = false;
        let mut escaped = false;

        while self.pos < self.input.len() {
            let byte = self.input[self.pos];
            self.pos += 1;

            if in_string {
                match byte {
                    _ if escaped => escaped = false,
                    b'\\' => escaped = true,
                    b'"' => in_string = false,
                    _ => {}
                }
                continue;
            }

            match byte {
                b'"' => in_string = true,
                b'{' => depth += 1,
                // A stray `}` at depth zero stays in the record and fails decoding
                b'}' if depth > 0 => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&self.input[start..self.pos]);
                    }
                }
                _ => {}
            }
        }

        // Trailing bytes never closed a record
        None
    }
}

/// Splits `raw` into its top-level JSON object records
pub fn split(raw: &[u8]) -> RecordSplitter<'_> {
    RecordSplitter::new(raw)
}
