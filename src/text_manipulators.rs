use lazy_static::lazy_static;
use regex::Regex;
use scraper::ElementRef;

lazy_static! {
    static ref TIME_TOKEN_REGEX: Regex =
        Regex::new(r"\b\d{1,2}:\d{2}\b").expect("time token regex to compile");
}

pub fn extract_text(node: ElementRef) -> String {
    node.text().collect::<String>()
}

/// Collects every time-of-day looking token on a line, left to right.
/// Hours may be 1 or 2 digits; minutes are always 2.
pub fn time_tokens(line: &str) -> Vec<&str> {
    TIME_TOKEN_REGEX.find_iter(line).map(|m| m.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_time_tokens_in_document_order() {
        let line = "Mon 1/09 5:10 then 13:05, ends 20:32.";
        assert_eq!(time_tokens(line), vec!["5:10", "13:05", "20:32"]);
    }

    #[test]
    fn ignores_tokens_that_are_not_times() {
        let line = "01/09/2024 123:45 9:9 nothing";
        assert!(time_tokens(line).is_empty());
    }
}
