//! Reader for the short label notation, e.g. `Gly5Asp`, `Gln10[6]` or
//! `[Ala1_Leu2delinsValLeu;Gly5del]`.

use nom::{
    branch::alt,
    bytes::complete::{tag, take},
    character::complete::{char, digit1},
    combinator::{all_consuming, map, map_opt, map_res, opt},
    multi::{many1, separated_list1},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};
use serde::Serialize;
use thiserror::Error;

use crate::amino_acid::{is_placeholder, one_letter_code};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("Invalid short label notation: {0}")]
    Invalid(String),
}

/// The change written after the position part of a fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParsedEdit {
    /// Plain residues (substitution, insertion or tandem repeat), as one-letter codes
    Residues(String),
    Deletion,
    /// `delins` followed by residues, as one-letter codes
    DeletionInsertion(String),
    /// `[n]` single-residue repeat count
    Repeat(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedFragment {
    pub start: usize,
    pub start_residue: char,
    pub end: usize,
    pub end_residue: char,
    pub edit: ParsedEdit,
}

impl ParsedFragment {
    pub fn spans_multiple_residues(&self) -> bool {
        self.start != self.end
    }
}

fn residue(input: &str) -> IResult<&str, char> {
    map_opt(take(3usize), |code: &str| {
        one_letter_code(code).filter(|c| !is_placeholder(*c))
    })(input)
}

fn residues(input: &str) -> IResult<&str, String> {
    map(many1(residue), |codes: Vec<char>| codes.into_iter().collect::<String>())(input)
}

fn number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(input)
}

fn anchor(input: &str) -> IResult<&str, (char, usize)> {
    pair(residue, number)(input)
}

fn edit(input: &str) -> IResult<&str, ParsedEdit> {
    alt((
        map(preceded(tag("delins"), residues), ParsedEdit::DeletionInsertion),
        map(tag("del"), |_| ParsedEdit::Deletion),
        map(delimited(char('['), number, char(']')), ParsedEdit::Repeat),
        map(residues, ParsedEdit::Residues),
    ))(input)
}

fn fragment(input: &str) -> IResult<&str, ParsedFragment> {
    map(
        tuple((anchor, opt(preceded(char('_'), anchor)), edit)),
        |((start_residue, start), last, edit)| {
            let (end_residue, end) = last.unwrap_or((start_residue, start));
            ParsedFragment {
                start,
                start_residue,
                end,
                end_residue,
                edit,
            }
        },
    )(input)
}

fn label(input: &str) -> IResult<&str, Vec<ParsedFragment>> {
    preceded(
        opt(tag("p.")),
        alt((
            delimited(char('['), separated_list1(char(';'), fragment), char(']')),
            map(fragment, |f| vec![f]),
        )),
    )(input)
}

/// Parse a single range fragment such as `Ala1_Leu2delinsValLeu`.
pub fn parse_fragment(input: &str) -> Result<ParsedFragment, NotationError> {
    all_consuming(fragment)(input.trim())
        .map(|(_, parsed)| parsed)
        .map_err(|_| NotationError::Invalid(input.to_string()))
}

/// Parse a full label, bracketed or not, into its fragments.
pub fn parse_label(input: &str) -> Result<Vec<ParsedFragment>, NotationError> {
    all_consuming(label)(input.trim())
        .map(|(_, parsed)| parsed)
        .map_err(|_| NotationError::Invalid(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_substitution() {
        let f = parse_fragment("Gly12Asp").unwrap();
        assert_eq!(f.start, 12);
        assert_eq!(f.end, 12);
        assert_eq!(f.start_residue, 'G');
        assert_eq!(f.edit, ParsedEdit::Residues("D".to_string()));
        assert!(!f.spans_multiple_residues());
    }

    #[test]
    fn test_parse_delins() {
        let f = parse_fragment("Ala1_Leu2delinsValLeu").unwrap();
        assert_eq!(f.start, 1);
        assert_eq!(f.end, 2);
        assert_eq!(f.end_residue, 'L');
        assert_eq!(f.edit, ParsedEdit::DeletionInsertion("VL".to_string()));
    }

    #[test]
    fn test_parse_deletion_and_repeat() {
        assert_eq!(parse_fragment("Gly5del").unwrap().edit, ParsedEdit::Deletion);
        assert_eq!(parse_fragment("Gln10[6]").unwrap().edit, ParsedEdit::Repeat(6));
    }

    #[test]
    fn test_parse_stop_residue() {
        let f = parse_fragment("Arg3Ter").unwrap();
        assert_eq!(f.edit, ParsedEdit::Residues("*".to_string()));
    }

    #[test]
    fn test_parse_label_brackets() {
        let fragments = parse_label("[Lys2Arg;Gly5Asp]").unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].start, 2);
        assert_eq!(fragments[1].start, 5);

        let single = parse_label("p.Gly5Asp").unwrap();
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_fragment("").is_err());
        assert!(parse_fragment("G5D").is_err());
        assert!(parse_fragment("Gly5").is_err());
        assert!(parse_fragment("Gly5Asp;").is_err());
        assert!(parse_label("[Gly5Asp").is_err());
        assert!(parse_fragment("Gly5deldel").is_err());
    }
}
