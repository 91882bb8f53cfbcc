//! Reference lists: `Cd. 138; Th. 173, 11; Gen. 2862`.

use crate::abbreviations::AbbreviationTable;
use crate::cursor::Cursor;
use crate::model::Reference;

/// Parse `abbreviation pages (; abbreviation pages)*` at the cursor.
///
/// A pair that fails to parse leaves the cursor where it started and ends
/// the list. An empty result means no references, not an error.
pub fn parse_references(
    input: &str,
    cursor: &mut Cursor,
    abbreviations: &AbbreviationTable,
) -> Vec<Reference> {
    let mut references = Vec::new();

    loop {
        let checkpoint = *cursor;

        if !references.is_empty() {
            cursor.skip_whitespace(input);
            if !cursor.eat(input, ";") {
                *cursor = checkpoint;
                break;
            }
        }

        match parse_reference(input, cursor, abbreviations) {
            Some(reference) => references.push(reference),
            None => {
                *cursor = checkpoint;
                break;
            }
        }
    }

    references
}

fn parse_reference(
    input: &str,
    cursor: &mut Cursor,
    abbreviations: &AbbreviationTable,
) -> Option<Reference> {
    let start = *cursor;
    cursor.skip_whitespace(input);

    let Some(abbreviation) = abbreviations.longest_prefix_of(cursor.rest(input)) else {
        *cursor = start;
        return None;
    };
    cursor.advance(abbreviation.len());

    let page_numbers = parse_page_numbers(input, cursor);
    if page_numbers.is_empty() {
        *cursor = start;
        return None;
    }

    Some(Reference {
        source_abbreviation: abbreviation.to_string(),
        page_numbers,
    })
}

/// `digits (, digits)*`. A comma not followed by digits is left unconsumed.
fn parse_page_numbers(input: &str, cursor: &mut Cursor) -> Vec<String> {
    let mut numbers = Vec::new();

    cursor.skip_whitespace(input);
    let Some(first) = cursor.eat_digits(input) else {
        return numbers;
    };
    numbers.push(first.to_string());

    loop {
        let checkpoint = *cursor;
        cursor.skip_whitespace(input);
        if !cursor.eat(input, ",") {
            *cursor = checkpoint;
            break;
        }
        cursor.skip_whitespace(input);
        match cursor.eat_digits(input) {
            Some(digits) => numbers.push(digits.to_string()),
            None => {
                *cursor = checkpoint;
                break;
            }
        }
    }

    numbers
}

#[cfg(test)]
mod reference_tests {
    use super::*;

    fn table() -> AbbreviationTable {
        AbbreviationTable::from_spellings(["Gen.", "Th.", "Cd.", "Bt.", "Bt. Sm."])
    }

    fn parse(input: &str) -> (Vec<Reference>, usize) {
        let mut cursor = Cursor::new();
        let refs = parse_references(input, &mut cursor, &table());
        (refs, cursor.position())
    }

    fn reference(abbreviation: &str, pages: &[&str]) -> Reference {
        Reference {
            source_abbreviation: abbreviation.to_string(),
            page_numbers: pages.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn single_reference_with_page_list() {
        let (refs, end) = parse(" Gen. 3, 5");
        assert_eq!(refs, vec![reference("Gen.", &["3", "5"])]);
        assert_eq!(end, " Gen. 3, 5".len());
    }

    #[test]
    fn semicolon_separated_references() {
        let input = " Cd. 138; Th. 173, 11; Gen. 2862. Next";
        let (refs, end) = parse(input);
        assert_eq!(
            refs,
            vec![
                reference("Cd.", &["138"]),
                reference("Th.", &["173", "11"]),
                reference("Gen.", &["2862"]),
            ]
        );
        assert_eq!(&input[end..], ". Next");
    }

    #[test]
    fn unknown_abbreviation_yields_nothing_and_consumes_nothing() {
        let (refs, end) = parse(" Ex. 4");
        assert!(refs.is_empty());
        assert_eq!(end, 0);
    }

    #[test]
    fn abbreviation_without_pages_fails() {
        let (refs, end) = parse(" Gen. iv");
        assert!(refs.is_empty());
        assert_eq!(end, 0);
    }

    #[test]
    fn malformed_page_number_truncates_list() {
        let input = " Th. 12, 14, x";
        let (refs, end) = parse(input);
        assert_eq!(refs, vec![reference("Th.", &["12", "14"])]);
        assert_eq!(&input[end..], ", x");
    }

    #[test]
    fn failed_second_pair_keeps_first() {
        let input = " Th. 12; Ex. 4";
        let (refs, end) = parse(input);
        assert_eq!(refs, vec![reference("Th.", &["12"])]);
        assert_eq!(&input[end..], "; Ex. 4");
    }

    #[test]
    fn missing_semicolon_ends_list() {
        let input = " Th. 12 Gen. 4";
        let (refs, end) = parse(input);
        assert_eq!(refs.len(), 1);
        assert_eq!(&input[end..], " Gen. 4");
    }

    #[test]
    fn longest_abbreviation_is_preferred() {
        let (refs, _) = parse(" Bt. Sm. 7");
        assert_eq!(refs, vec![reference("Bt. Sm.", &["7"])]);

        let (refs, _) = parse(" Bt. 7");
        assert_eq!(refs, vec![reference("Bt.", &["7"])]);
    }

    #[test]
    fn whitespace_around_commas() {
        let (refs, _) = parse("Gen. 1 ,2 , 3");
        assert_eq!(refs, vec![reference("Gen.", &["1", "2", "3"])]);
    }
}
