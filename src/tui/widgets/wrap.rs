use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Word-wrap `text` into rows no wider than `width` terminal cells
///
/// Words wider than a row are broken between characters. Embedded newlines
/// start a new row. Always returns at least one row.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            let gap = usize::from(!current.is_empty());

            if current_width + gap + word_width <= width {
                if gap == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += gap + word_width;
                continue;
            }

            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for c in word.chars() {
                let char_width = c.width().unwrap_or(0);
                if current_width + char_width > width && !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += char_width;
            }
        }

        rows.push(current);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_row() {
        assert_eq!(wrap_text("olá turma", 20), vec!["olá turma"]);
    }

    #[test]
    fn test_breaks_at_word_boundaries() {
        let rows = wrap_text("palavra palavra palavra FIM", 16);
        assert_eq!(rows, vec!["palavra palavra", "palavra FIM"]);
        assert!(rows.iter().all(|row| row.width() <= 16));
    }

    #[test]
    fn test_long_word_is_split() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_newlines_and_empty_text() {
        assert_eq!(wrap_text("um\ndois", 10), vec!["um", "dois"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }
}
