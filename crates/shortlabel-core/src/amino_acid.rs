/// Character used by curators to mark a removed residue in a resulting sequence.
pub const DELETION_PLACEHOLDER: char = '.';

/// One-letter to three-letter amino acid codes, including ambiguity codes,
/// selenocysteine, pyrrolysine, stop and the deletion placeholder.
const CODES: [(char, &str); 27] = [
    ('A', "Ala"), ('R', "Arg"), ('N', "Asn"), ('D', "Asp"),
    ('C', "Cys"), ('E', "Glu"), ('Q', "Gln"), ('G', "Gly"),
    ('H', "His"), ('I', "Ile"), ('L', "Leu"), ('K', "Lys"),
    ('M', "Met"), ('F', "Phe"), ('P', "Pro"), ('S', "Ser"),
    ('T', "Thr"), ('W', "Trp"), ('Y', "Tyr"), ('V', "Val"),
    ('B', "Asx"), ('Z', "Glx"), ('X', "Xaa"), ('U', "Sec"),
    ('O', "Pyl"), ('*', "Ter"), (DELETION_PLACEHOLDER, "del"),
];

/// Translate a one-letter residue code to its three-letter code.
///
/// Codes are case-sensitive: lowercase letters are not residues here.
pub fn three_letter_code(one_letter: char) -> Option<&'static str> {
    CODES
        .iter()
        .find(|(code, _)| *code == one_letter)
        .map(|(_, three)| *three)
}

/// Reverse lookup used when reading labels back.
pub fn one_letter_code(three_letter: &str) -> Option<char> {
    CODES
        .iter()
        .find(|(_, three)| *three == three_letter)
        .map(|(code, _)| *code)
}

/// Concatenate the three-letter codes of every residue in `seq`.
///
/// Returns the first character that has no three-letter code.
pub fn encode_sequence(seq: &str) -> Result<String, char> {
    let mut out = String::with_capacity(seq.len() * 3);
    for c in seq.chars() {
        out.push_str(three_letter_code(c).ok_or(c)?);
    }
    Ok(out)
}

pub fn is_placeholder(c: char) -> bool {
    c == DELETION_PLACEHOLDER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_residues() {
        assert_eq!(three_letter_code('A'), Some("Ala"));
        assert_eq!(three_letter_code('W'), Some("Trp"));
        assert_eq!(three_letter_code('Q'), Some("Gln"));
        assert_eq!(three_letter_code('G'), Some("Gly"));
    }

    #[test]
    fn test_special_codes() {
        assert_eq!(three_letter_code('B'), Some("Asx"));
        assert_eq!(three_letter_code('Z'), Some("Glx"));
        assert_eq!(three_letter_code('X'), Some("Xaa"));
        assert_eq!(three_letter_code('U'), Some("Sec"));
        assert_eq!(three_letter_code('O'), Some("Pyl"));
        assert_eq!(three_letter_code('*'), Some("Ter"));
        assert_eq!(three_letter_code('.'), Some("del"));
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(three_letter_code('a'), None);
        assert_eq!(three_letter_code('1'), None);
        assert_eq!(three_letter_code('-'), None);
        assert_eq!(three_letter_code('J'), None);
    }

    #[test]
    fn test_reverse_lookup() {
        assert_eq!(one_letter_code("Gly"), Some('G'));
        assert_eq!(one_letter_code("Ter"), Some('*'));
        assert_eq!(one_letter_code("GLY"), None);
    }

    #[test]
    fn test_encode_sequence() {
        assert_eq!(encode_sequence("VL").unwrap(), "ValLeu");
        assert_eq!(encode_sequence("").unwrap(), "");
        assert_eq!(encode_sequence("A1G"), Err('1'));
    }
}
