//! Vietnamese-aware name ordering and folding.
//!
//! Names compare letter by letter on the Vietnamese alphabet first (ă after
//! a, đ after d, ư after u, ...), and only then on tone marks. Latin
//! letters outside the Vietnamese alphabet slot in at their usual place.

use std::cmp::Ordering;

/// Alphabet order, with f/j/w/z kept for foreign names.
const ALPHABET: &str = "aăâbcdđeêfghijklmnoôơpqrstuưvwxyz";

/// Each toned vowel by base letter. Index 0 is unmarked, then huyền, hỏi,
/// ngã, sắc, nặng.
const TONED_VOWELS: [(char, &str); 12] = [
    ('a', "aàảãáạ"),
    ('ă', "ăằẳẵắặ"),
    ('â', "âầẩẫấậ"),
    ('e', "eèẻẽéẹ"),
    ('ê', "êềểễếệ"),
    ('i', "iìỉĩíị"),
    ('o', "oòỏõóọ"),
    ('ô', "ôồổỗốộ"),
    ('ơ', "ơờởỡớợ"),
    ('u', "uùủũúụ"),
    ('ư', "ưừửữứự"),
    ('y', "yỳỷỹýỵ"),
];

/// Offset that puts alphabet letters after spaces, digits and punctuation.
const LETTER_BASE: u32 = 0x11_0000;

/// Combining tone marks by tone index, for names stored decomposed.
const COMBINING_TONES: [(char, u8); 5] = [
    ('\u{0300}', 1),
    ('\u{0309}', 2),
    ('\u{0303}', 3),
    ('\u{0301}', 4),
    ('\u{0323}', 5),
];

/// Splits a lowercase character into its base letter and tone index.
fn split_tone(c: char) -> (char, u8) {
    for (base, forms) in TONED_VOWELS {
        if let Some(tone) = forms.chars().position(|f| f == c) {
            return (base, tone as u8);
        }
    }
    (c, 0)
}

/// The letter a combining breve, circumflex or horn turns `base` into.
fn with_mark(base: char, mark: char) -> Option<char> {
    match (base, mark) {
        ('a', '\u{0306}') => Some('ă'),
        ('a', '\u{0302}') => Some('â'),
        ('e', '\u{0302}') => Some('ê'),
        ('o', '\u{0302}') => Some('ô'),
        ('o', '\u{031B}') => Some('ơ'),
        ('u', '\u{031B}') => Some('ư'),
        _ => None,
    }
}

fn is_combining(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Lowercase base letters with their tone index. Combining marks are
/// folded into the letter before them, so precomposed and decomposed
/// spellings give the same letters.
fn letters(text: &str) -> Vec<(char, u8)> {
    let mut out: Vec<(char, u8)> = Vec::new();
    for c in text.chars().flat_map(char::to_lowercase) {
        if !is_combining(c) {
            out.push(split_tone(c));
            continue;
        }
        let Some(last) = out.last_mut() else {
            continue;
        };
        if let Some(&(_, tone)) = COMBINING_TONES.iter().find(|(mark, _)| *mark == c) {
            last.1 = tone;
        } else if let Some(base) = with_mark(last.0, c) {
            last.0 = base;
        }
    }
    out
}

fn primary_weight(base: char) -> u32 {
    match ALPHABET.chars().position(|letter| letter == base) {
        Some(index) => LETTER_BASE + index as u32,
        None => base as u32,
    }
}

/// Collation key for one name: primary weights, then tones.
fn sort_key(name: &str) -> (Vec<u32>, Vec<u8>) {
    letters(name)
        .into_iter()
        .map(|(base, tone)| (primary_weight(base), tone))
        .unzip()
}

/// Compares two names the way a Vietnamese dictionary would.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

/// Lowercases and strips all diacritics, including đ → d.
pub fn fold_diacritics(text: &str) -> String {
    letters(text)
        .into_iter()
        .map(|(base, _)| match base {
            'ă' | 'â' => 'a',
            'đ' => 'd',
            'ê' => 'e',
            'ô' | 'ơ' => 'o',
            'ư' => 'u',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_follow_vietnamese_alphabet() {
        assert_eq!(compare_names("Ân", "Bình"), Ordering::Less);
        assert_eq!(compare_names("Dũng", "Đức"), Ordering::Less);
        assert_eq!(compare_names("Đức", "Em"), Ordering::Less);
        assert_eq!(compare_names("Uyên", "Ưng"), Ordering::Less);
        // Plain byte order would put "Ă" after "B".
        assert_eq!(compare_names("Ăn", "Ba"), Ordering::Less);
    }

    #[test]
    fn test_tones_break_ties() {
        assert_eq!(compare_names("Ma", "Mà"), Ordering::Less);
        assert_eq!(compare_names("Mà", "Má"), Ordering::Less);
        assert_eq!(compare_names("Mã", "Má"), Ordering::Less);
        // Base letters decide before tones do.
        assert_eq!(compare_names("Má", "Mb"), Ordering::Less);
    }

    #[test]
    fn test_case_and_length() {
        assert_eq!(compare_names("an", "An"), Ordering::Greater);
        assert_eq!(compare_names("An", "An Bình"), Ordering::Less);
        assert_eq!(compare_names("Lan", "Lan"), Ordering::Equal);
    }

    #[test]
    fn test_fold_diacritics() {
        assert_eq!(fold_diacritics("Nguyễn Thị Ánh"), "nguyen thi anh");
        assert_eq!(fold_diacritics("Đặng Ưng"), "dang ung");
        assert_eq!(fold_diacritics("Trần Văn Ơn"), "tran van on");
    }

    #[test]
    fn test_decomposed_names_fold_like_precomposed() {
        let decomposed = "Nguye\u{0302}\u{0303}n Va\u{0306}n An";
        assert_eq!(fold_diacritics(decomposed), "nguyen van an");
        // Dot below comes before the breve in canonical order.
        assert_eq!(fold_diacritics("\u{0110}a\u{0323}\u{0306}ng"), "dang");
        assert_eq!(fold_diacritics("U\u{031B}\u{0300}ng"), "ung");
    }

    #[test]
    fn test_decomposed_names_collate_like_precomposed() {
        assert_eq!(sort_key("A\u{0301}nh"), sort_key("Ánh"));
        assert_eq!(sort_key("a\u{0323}\u{0306}"), sort_key("ặ"));
        assert_eq!(sort_key("O\u{031B}n"), sort_key("Ơn"));

        assert_eq!(compare_names("A\u{0301}nh", "Anh"), Ordering::Greater);
        assert_eq!(compare_names("A\u{0301}nh", "Ba"), Ordering::Less);
        assert_eq!(compare_names("O\u{031B}n", "Ôn"), Ordering::Greater);
    }
}
