use regex::Regex;
use std::sync::LazyLock;

static NON_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s&'-]").expect("static pattern"));
static REPEAT_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// headsign tokens that never discriminate between schools.
const STOPWORDS: [&str; 7] = ["to", "via", "am", "pm", "from", "service", "route"];

/// canonicalizes a free-text name for comparison: lower-case, strip
/// characters outside `[a-z0-9 space & ' -]`, collapse whitespace, trim.
/// pure, total, and idempotent.
pub fn normalize_name(s: &str) -> String {
    let lowered = s.to_lowercase();
    let stripped = NON_NAME_CHARS.replace_all(&lowered, " ");
    REPEAT_WHITESPACE
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// builds a match query from trip headsign text: normalize, then drop
/// stopword tokens. used only for query construction, never for the
/// canonical school-name normalization.
pub fn headsign_query(headsign: &str) -> String {
    normalize_name(headsign)
        .split_whitespace()
        .filter(|word| !STOPWORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(
            normalize_name("St. Mary's College (Junior Campus)!"),
            "st mary's college junior campus"
        );
    }

    #[test]
    fn normalize_keeps_ampersand_hyphen_apostrophe() {
        assert_eq!(normalize_name("O'Connor & Lyneham-North"), "o'connor & lyneham-north");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in [
            "",
            "Chapman Primary",
            "  weird   spacing\t",
            "símbolos ñ ü!",
            "123 ABC-def & x's",
        ] {
            let once = normalize_name(s);
            assert_eq!(normalize_name(&once), once);
        }
    }

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(headsign_query(""), "");
    }

    #[test]
    fn headsign_query_drops_stopwords() {
        assert_eq!(
            headsign_query("To Chapman Primary via Kambah AM Service"),
            "chapman primary kambah"
        );
    }
}
