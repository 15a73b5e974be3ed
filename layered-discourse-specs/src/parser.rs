//! Parser for fixture files.
//!
//! ## Token syntax
//!
//! Sentences are whitespace-separated tokens, each written as
//! `text/UPOS/lemma/FEATS/flags`. Everything after the text is optional and
//! empty fields fall back to defaults:
//!
//! - `text`: surface form; `+` stands for a space inside one token
//! - `UPOS`: Universal POS tag (`PRON`, `VERB`, ...)
//! - `lemma`: defaults to the normalized text
//! - `FEATS`: UD morphology such as `Number=Sing|Person=2`
//! - `flags`: comma-separated `stop`, `punct`, or `deprel:head` where `head`
//!   is the index of the head token in the same sentence
//!
//! ## Markers and tags
//!
//! Antecedent markers are one `0`/`1` per expanded source position. Expected
//! tags are one entry per expanded target position: `-` for none, or
//! phenomenon names joined by `+`.

use layered_discourse::{
    Alignment, ExpandedSentence, Morph, Phenomenon, Pos, TagSet, TaggerConfig, Token,
};

use crate::errors::{SpecError, SpecResult};
use crate::fixture::{DiscourseFixture, FixtureSentence, RawFixture, RawSentence};

/// Parse a whole fixture file.
pub fn parse_fixture(content: &str) -> SpecResult<DiscourseFixture> {
    let raw: RawFixture = toml::from_str(content)?;

    let mut config = TaggerConfig::default();
    if let Some(names) = raw.phenomena {
        config = config.with_phenomena(&names)?;
    }
    if let Some(threshold) = raw.cohesion_threshold {
        config = config.with_cohesion_threshold(threshold);
    }
    if let Some(policy) = raw.first_sentence_antecedents {
        config = config.with_first_sentence_antecedents(policy);
    }
    config.validate()?;

    let sentences = raw
        .sentences
        .iter()
        .enumerate()
        .map(|(idx, sentence)| {
            parse_sentence(sentence).map_err(|message| SpecError::Parse {
                sentence: idx,
                message,
            })
        })
        .collect::<SpecResult<Vec<_>>>()?;

    Ok(DiscourseFixture {
        title: raw.title,
        language: raw.language,
        config,
        sentences,
    })
}

fn parse_sentence(raw: &RawSentence) -> Result<FixtureSentence, String> {
    let source = parse_tokens(&raw.source)?;
    let target = parse_tokens(&raw.target)?;
    let source_len = ExpandedSentence::new(source.clone()).len();
    let target_len = ExpandedSentence::new(target.clone()).len();

    let alignment = Alignment::parse(&raw.alignment).map_err(|e| e.to_string())?;

    let antecedents = match &raw.antecedents {
        Some(markers) => {
            let markers = parse_markers(markers)?;
            if markers.len() != source_len {
                return Err(format!(
                    "{} antecedent markers for {} source positions",
                    markers.len(),
                    source_len
                ));
            }
            Some(markers)
        }
        None => None,
    };

    let expect = parse_tags(&raw.expect)?;
    if expect.len() != target_len {
        return Err(format!(
            "{} expected tag entries for {} target positions",
            expect.len(),
            target_len
        ));
    }

    Ok(FixtureSentence {
        document: raw.document,
        source,
        target,
        alignment,
        antecedents,
        expect,
    })
}

/// Parse a sentence written in token syntax.
pub fn parse_tokens(line: &str) -> Result<Vec<Token>, String> {
    line.split_whitespace().map(parse_token).collect()
}

/// Parse one `text/UPOS/lemma/FEATS/flags` token.
pub fn parse_token(word: &str) -> Result<Token, String> {
    let fields: Vec<&str> = word.split('/').collect();
    if fields.len() > 5 {
        return Err(format!("token {:?} has more than five fields", word));
    }

    let text = fields[0].replace('+', " ");
    if text.trim().is_empty() {
        return Err(format!("token {:?} has no text", word));
    }
    let mut token = Token::new(text);

    if let Some(pos) = fields.get(1).filter(|f| !f.is_empty()) {
        token = token.with_pos(Pos::parse(pos));
    }
    if let Some(lemma) = fields.get(2).filter(|f| !f.is_empty()) {
        token = token.with_lemma(*lemma);
    }
    if let Some(feats) = fields.get(3).filter(|f| !f.is_empty()) {
        token = token.with_morph(Morph::parse(feats));
    }
    if let Some(flags) = fields.get(4).filter(|f| !f.is_empty()) {
        for flag in flags.split(',') {
            token = match flag {
                "stop" => token.with_stop(true),
                "punct" => token.with_punct(true),
                _ => {
                    let (dep, head) = flag
                        .split_once(':')
                        .ok_or_else(|| format!("unknown flag {:?} in token {:?}", flag, word))?;
                    let head: usize = head
                        .parse()
                        .map_err(|_| format!("invalid head {:?} in token {:?}", head, word))?;
                    token.with_dependency(dep, head)
                }
            };
        }
    }

    Ok(token)
}

/// Parse `0`/`1` antecedent markers.
pub fn parse_markers(markers: &str) -> Result<Vec<bool>, String> {
    markers
        .split_whitespace()
        .map(|m| match m {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(format!("invalid antecedent marker {:?}", other)),
        })
        .collect()
}

/// Parse expected tags, one entry per position.
pub fn parse_tags(tags: &str) -> Result<Vec<TagSet>, String> {
    tags.split_whitespace()
        .map(|entry| {
            if entry == "-" {
                return Ok(TagSet::new());
            }
            entry
                .split('+')
                .map(|name| name.parse::<Phenomenon>().map_err(|e| e.to_string()))
                .collect()
        })
        .collect()
}
