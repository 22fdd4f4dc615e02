//! Folding of Cyrillic and Greek look-alikes to Latin.

/// What to do with one character during homograph folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fold {
    /// Not a spoofing character; keep as is.
    Keep,
    /// Replace with the Latin letter it imitates.
    Latin(char),
    /// Spoofing-range character with no Latin twin, or an invisible control.
    Drop,
}

/// Classify a character for folding.
pub fn fold(c: char) -> Fold {
    if let Some(latin) = latin_twin(c) {
        return Fold::Latin(latin);
    }
    if is_invisible(c) || is_spoofing_script(c) {
        return Fold::Drop;
    }
    Fold::Keep
}

/// Map every look-alike to Latin and drop the rest of the spoofing ranges.
pub fn fold_homographs(input: &str) -> String {
    input
        .chars()
        .filter_map(|c| match fold(c) {
            Fold::Keep => Some(c),
            Fold::Latin(l) => Some(l),
            Fold::Drop => None,
        })
        .collect()
}

fn is_spoofing_script(c: char) -> bool {
    matches!(c as u32, 0x0370..=0x03FF | 0x0400..=0x04FF | 0x0500..=0x052F)
}

fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'
            | '\u{2066}'..='\u{2069}'
            | '\u{061C}'
            | '\u{180E}'
            | '\u{00AD}'
            | '\u{FEFF}'
    )
}

fn latin_twin(c: char) -> Option<char> {
    let latin = match c {
        // Cyrillic lowercase
        'а' => 'a',
        'в' => 'b',
        'е' => 'e',
        'ё' => 'e',
        'һ' => 'h',
        'і' => 'i',
        'ї' => 'i',
        'ј' => 'j',
        'к' => 'k',
        'м' => 'm',
        'н' => 'h',
        'о' => 'o',
        'р' => 'p',
        'с' => 'c',
        'т' => 't',
        'у' => 'y',
        'х' => 'x',
        'ѕ' => 's',
        'ԁ' => 'd',
        'ԛ' => 'q',
        'ԝ' => 'w',
        // Cyrillic uppercase
        'А' => 'A',
        'В' => 'B',
        'Е' => 'E',
        'Ѕ' => 'S',
        'І' => 'I',
        'Ј' => 'J',
        'К' => 'K',
        'М' => 'M',
        'Н' => 'H',
        'О' => 'O',
        'Р' => 'P',
        'С' => 'C',
        'Т' => 'T',
        'У' => 'Y',
        'Х' => 'X',
        // Greek lowercase
        'α' => 'a',
        'ε' => 'e',
        'ι' => 'i',
        'κ' => 'k',
        'ν' => 'v',
        'ο' => 'o',
        'ρ' => 'p',
        'τ' => 't',
        'υ' => 'u',
        'χ' => 'x',
        // Greek uppercase
        'Α' => 'A',
        'Β' => 'B',
        'Ε' => 'E',
        'Ζ' => 'Z',
        'Η' => 'H',
        'Ι' => 'I',
        'Κ' => 'K',
        'Μ' => 'M',
        'Ν' => 'N',
        'Ο' => 'O',
        'Ρ' => 'P',
        'Τ' => 'T',
        'Υ' => 'Y',
        'Χ' => 'X',
        _ => return None,
    };
    Some(latin)
}
