//! The canonical "expanded position" index space of a sentence.
//!
//! Upstream tokens may contain embedded spaces. The aligner sees the sentence
//! as whitespace-separated pieces, so every piece becomes its own position and
//! every index the tagger handles (alignment links, antecedent markers, output
//! tags) refers to these positions, never to upstream token indices.
//!
//! ```text
//! tokens:     [Le] [New York] [Times]
//! positions:   0    1    2     3
//! token_of:    0    1    1     2
//! ```

use std::ops::Range;

use crate::Token;

/// One whitespace piece of an upstream token.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Piece {
    token: usize,
    text: String,
    norm: String,
}

/// A tokenized sentence together with its expanded position space.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpandedSentence {
    tokens: Vec<Token>,
    pieces: Vec<Piece>,
    /// `token_ranges[i]` is the position range covered by upstream token `i`
    token_ranges: Vec<Range<usize>>,
}

impl ExpandedSentence {
    /// Expand a sentence's upstream tokens.
    ///
    /// A token whose text is empty or all whitespace covers an empty range.
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut pieces = Vec::new();
        let mut token_ranges = Vec::with_capacity(tokens.len());

        for (token_idx, token) in tokens.iter().enumerate() {
            let start = pieces.len();
            for text in token.text.split_whitespace() {
                pieces.push(Piece {
                    token: token_idx,
                    text: text.to_string(),
                    norm: crate::normalize(text),
                });
            }
            token_ranges.push(start..pieces.len());
        }

        Self {
            tokens,
            pieces,
            token_ranges,
        }
    }

    /// Number of expanded positions.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// The upstream tokens, unexpanded.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Upstream token index owning `pos`.
    pub fn token_index(&self, pos: usize) -> Option<usize> {
        self.pieces.get(pos).map(|p| p.token)
    }

    /// Upstream token owning `pos`; its linguistic features apply to every
    /// position it covers.
    pub fn token_at(&self, pos: usize) -> Option<&Token> {
        self.token_index(pos).map(|idx| &self.tokens[idx])
    }

    /// Positions covered by upstream token `token`.
    pub fn positions_of(&self, token: usize) -> Range<usize> {
        self.token_ranges.get(token).cloned().unwrap_or(0..0)
    }

    /// True if `token` spans more than one position.
    pub fn is_split(&self, token: usize) -> bool {
        self.positions_of(token).len() > 1
    }

    /// Surface text of the piece at `pos`.
    pub fn text(&self, pos: usize) -> Option<&str> {
        self.pieces.get(pos).map(|p| p.text.as_str())
    }

    /// Normalized text of the piece at `pos`.
    pub fn norm(&self, pos: usize) -> Option<&str> {
        self.pieces.get(pos).map(|p| p.norm.as_str())
    }

    /// Key under which `pos` takes part in lexical cohesion.
    ///
    /// `None` for stopwords, punctuation and out-of-range positions; such a
    /// placeholder never matches anything. Split tokens use the normalized
    /// piece since the lemma describes the whole token. Symbol-only pieces,
    /// which normalize to nothing, keep their surface text so distinct
    /// symbols stay distinct.
    pub fn cohesion_key(&self, pos: usize) -> Option<&str> {
        let piece = self.pieces.get(pos)?;
        let token = &self.tokens[piece.token];
        if !token.is_content_word() {
            return None;
        }
        let key = if self.is_split(piece.token) || token.lemma.is_empty() {
            piece.norm.as_str()
        } else {
            token.lemma.as_str()
        };
        Some(if key.is_empty() { piece.text.as_str() } else { key })
    }

    /// Pieces joined by single spaces, as handed to the aligner.
    pub fn aligner_text(&self) -> String {
        let mut text = String::new();
        for (idx, piece) in self.pieces.iter().enumerate() {
            if idx > 0 {
                text.push(' ');
            }
            text.push_str(&piece.text);
        }
        text
    }

    /// Iterate `(position, piece text)`.
    pub fn texts(&self) -> impl Iterator<Item = (usize, &str)> {
        self.pieces
            .iter()
            .enumerate()
            .map(|(pos, p)| (pos, p.text.as_str()))
    }
}

impl From<Vec<Token>> for ExpandedSentence {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pos;

    fn sentence(words: &[&str]) -> ExpandedSentence {
        ExpandedSentence::new(words.iter().map(|w| Token::new(*w)).collect())
    }

    #[test]
    fn unsplit_sentence_is_identity() {
        let sent = sentence(&["Du", "kommst", "."]);
        assert_eq!(sent.len(), 3);
        for pos in 0..3 {
            assert_eq!(sent.token_index(pos), Some(pos));
            assert_eq!(sent.positions_of(pos), pos..pos + 1);
        }
        assert_eq!(sent.aligner_text(), "Du kommst .");
    }

    #[test]
    fn split_token_shares_features() {
        let tokens = vec![
            Token::new("Le"),
            Token::new("New York").with_pos(Pos::Propn).with_lemma("new york"),
            Token::new("Times"),
        ];
        let sent = ExpandedSentence::new(tokens);

        assert_eq!(sent.len(), 4);
        assert_eq!(sent.token_index(1), Some(1));
        assert_eq!(sent.token_index(2), Some(1));
        assert_eq!(sent.token_index(3), Some(2));
        assert_eq!(sent.positions_of(1), 1..3);
        assert!(sent.is_split(1));
        assert_eq!(sent.token_at(2).map(|t| t.pos), Some(Pos::Propn));
        assert_eq!(sent.text(2), Some("York"));
        assert_eq!(sent.norm(2), Some("york"));
        assert_eq!(sent.aligner_text(), "Le New York Times");
    }

    #[test]
    fn empty_token_covers_no_position() {
        let sent = sentence(&["a", " ", "b"]);
        assert_eq!(sent.len(), 2);
        assert_eq!(sent.positions_of(1), 1..1);
        assert_eq!(sent.token_index(1), Some(2));
    }

    #[test]
    fn out_of_range_lookups_are_none() {
        let sent = sentence(&["a"]);
        assert_eq!(sent.token_at(1), None);
        assert_eq!(sent.norm(5), None);
        assert_eq!(sent.cohesion_key(1), None);
        assert_eq!(sent.positions_of(9), 0..0);
    }

    #[test]
    fn cohesion_key_uses_lemma_unless_split() {
        let tokens = vec![
            Token::new("houses").with_lemma("house"),
            Token::new("the").with_stop(true),
            Token::new(",").with_punct(true),
            Token::new("ice cream").with_lemma("ice cream"),
        ];
        let sent = ExpandedSentence::new(tokens);
        assert_eq!(sent.cohesion_key(0), Some("house"));
        assert_eq!(sent.cohesion_key(1), None);
        assert_eq!(sent.cohesion_key(2), None);
        assert_eq!(sent.cohesion_key(3), Some("ice"));
        assert_eq!(sent.cohesion_key(4), Some("cream"));
    }

    #[test]
    fn symbol_pieces_key_on_surface_text() {
        let sent = sentence(&["$", "€", "£5"]);
        assert_eq!(sent.cohesion_key(0), Some("$"));
        assert_eq!(sent.cohesion_key(1), Some("€"));
        assert_eq!(sent.cohesion_key(2), Some("5"));
    }
}
