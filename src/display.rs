//! Text rendering of one tagged target sentence.

use std::fmt::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::{ExpandedSentence, TagSet};

/// Renders the target positions on one line and, below it, one underline row
/// per tagged position followed by its labels.
///
/// ```text
/// Du  kommst  ,  du
///                ╰╯formality
/// ```
pub struct TaggedSentenceDisplay<'a> {
    sentence: &'a ExpandedSentence,
    tags: &'a [TagSet],
}

impl<'a> TaggedSentenceDisplay<'a> {
    pub fn new(sentence: &'a ExpandedSentence, tags: &'a [TagSet]) -> Self {
        TaggedSentenceDisplay { sentence, tags }
    }
}

impl<'a> fmt::Display for TaggedSentenceDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SPACE_PADDING: usize = 2;
        let mut starts = Vec::with_capacity(self.sentence.len());
        let mut ends = Vec::with_capacity(self.sentence.len());

        let mut opening_line = String::new();
        for (pos, text) in self.sentence.texts() {
            if pos > 0 {
                opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
            }
            starts.push(UnicodeWidthStr::width(&*opening_line));
            opening_line.push_str(text);
            ends.push(UnicodeWidthStr::width(&*opening_line));
        }
        f.write_str(&opening_line)?;

        for (pos, tags) in self.tags.iter().enumerate() {
            if tags.is_empty() {
                continue;
            }
            let (Some(&start), Some(&end)) = (starts.get(pos), ends.get(pos)) else {
                break;
            };
            f.write_char('\n')?;
            for _ in 0..start {
                f.write_char(' ')?;
            }
            f.write_char('╰')?;
            for _ in (start + 1)..end.saturating_sub(1) {
                f.write_char('─')?;
            }
            if end - start > 1 {
                f.write_char('╯')?;
            }

            let mut first = true;
            for tag in tags {
                if !first {
                    f.write_str(", ")?;
                }
                first = false;
                f.write_str(tag.name())?;
            }
        }

        Ok(())
    }
}
