//! Change header scanning
//!
//! A header is a line of the form `# <address> <phrase>` where the phrase
//! comes from a fixed, closed table. Each recognized line is tagged with its
//! phrase; lines with unknown phrasing are skipped without error so newer
//! report formats do not abort parsing.

use regex::Regex;

use super::types::ActionKind;

/// Recognized header phrasings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderPhrase {
    Created,
    UpdatedInPlace,
    Destroyed,
    TaintedReplaced,
    Replaced,
    DriftBeenChanged,
    DriftChanged,
    DriftBeenDeleted,
    DriftBeenDestroyed,
}

/// What a phrase tells us about the action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseClass {
    /// The phrase alone determines the action
    Fixed(ActionKind),
    /// The direction must be read from the body (`+/` or `-/`)
    Replacement { tainted: bool },
}

impl HeaderPhrase {
    /// Priority order: more specific phrases before the ones they end with
    pub const ALL: [HeaderPhrase; 9] = [
        HeaderPhrase::TaintedReplaced,
        HeaderPhrase::Replaced,
        HeaderPhrase::UpdatedInPlace,
        HeaderPhrase::Created,
        HeaderPhrase::Destroyed,
        HeaderPhrase::DriftBeenChanged,
        HeaderPhrase::DriftChanged,
        HeaderPhrase::DriftBeenDeleted,
        HeaderPhrase::DriftBeenDestroyed,
    ];

    /// Exact phrase text following the address
    pub fn text(&self) -> &'static str {
        match self {
            HeaderPhrase::Created => "will be created",
            HeaderPhrase::UpdatedInPlace => "will be updated in-place",
            HeaderPhrase::Destroyed => "will be destroyed",
            HeaderPhrase::TaintedReplaced => "is tainted, so must be replaced",
            HeaderPhrase::Replaced => "must be replaced",
            HeaderPhrase::DriftBeenChanged => "has been changed",
            HeaderPhrase::DriftChanged => "has changed",
            HeaderPhrase::DriftBeenDeleted => "has been deleted",
            HeaderPhrase::DriftBeenDestroyed => "has been destroyed",
        }
    }

    /// Map the phrase onto an action, or mark it as direction-dependent
    pub fn class(&self) -> PhraseClass {
        match self {
            HeaderPhrase::Created => PhraseClass::Fixed(ActionKind::Create),
            HeaderPhrase::UpdatedInPlace => PhraseClass::Fixed(ActionKind::Update),
            HeaderPhrase::Destroyed => PhraseClass::Fixed(ActionKind::Destroy),
            HeaderPhrase::TaintedReplaced => PhraseClass::Replacement { tainted: true },
            HeaderPhrase::Replaced => PhraseClass::Replacement { tainted: false },
            HeaderPhrase::DriftBeenChanged | HeaderPhrase::DriftChanged => {
                PhraseClass::Fixed(ActionKind::DriftChanged)
            }
            HeaderPhrase::DriftBeenDeleted | HeaderPhrase::DriftBeenDestroyed => {
                PhraseClass::Fixed(ActionKind::DriftDeleted)
            }
        }
    }

    /// Find the phrase a header remainder ends with, returning the address part
    fn split(rest: &str) -> Option<(&str, HeaderPhrase)> {
        Self::ALL.iter().find_map(|phrase| {
            let address = rest.strip_suffix(phrase.text())?.strip_suffix(' ')?.trim_end();

            if address.is_empty() {
                None
            } else {
                Some((address, *phrase))
            }
        })
    }
}

/// One recognized header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    /// Index of the header in the normalized lines
    pub line: usize,

    /// Address as written (quotes retained)
    pub address: String,

    /// Phrase the header ended with
    pub phrase: HeaderPhrase,
}

/// Result of scanning a document for headers
#[derive(Debug, Clone, Default)]
pub struct HeaderScan {
    /// All matches in document order
    pub matches: Vec<HeaderMatch>,
}

impl HeaderScan {
    /// Matches for one phrase, in document order
    #[cfg(test)]
    pub fn by_phrase(&self, phrase: HeaderPhrase) -> impl Iterator<Item = &HeaderMatch> + '_ {
        self.matches.iter().filter(move |m| m.phrase == phrase)
    }

    /// Matches whose phrase maps to the given fixed action, in document order
    pub fn by_action(&self, action: ActionKind) -> impl Iterator<Item = &HeaderMatch> + '_ {
        self.matches
            .iter()
            .filter(move |m| m.phrase.class() == PhraseClass::Fixed(action))
    }

    /// Addresses for one phrase, in document order
    #[cfg(test)]
    pub fn addresses(&self, phrase: HeaderPhrase) -> Vec<&str> {
        self.by_phrase(phrase).map(|m| m.address.as_str()).collect()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Scanner for `# <address> <phrase>` lines
pub struct HeaderScanner {
    header_pattern: Regex,
}

impl Default for HeaderScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderScanner {
    pub fn new() -> Self {
        Self {
            // Match header lines anchored at column zero after normalization:
            // # aws_instance.example will be created
            // # module.db.aws_db_instance.main is tainted, so must be replaced
            header_pattern: Regex::new(r"^#\s+(\S.*?)\s*$").expect("Invalid header pattern regex"),
        }
    }

    /// Scan normalized lines and tag every recognized header
    pub fn scan(&self, lines: &[String]) -> HeaderScan {
        let matches = lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| self.classify_line(index, line))
            .collect();

        HeaderScan { matches }
    }

    fn classify_line(&self, index: usize, line: &str) -> Option<HeaderMatch> {
        let caps = self.header_pattern.captures(line)?;
        let rest = caps.get(1)?.as_str();
        let (address, phrase) = HeaderPhrase::split(rest)?;

        Some(HeaderMatch {
            line: index,
            address: address.to_string(),
            phrase,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::normalize::normalize;

    fn scan(text: &str) -> HeaderScan {
        HeaderScanner::new().scan(&normalize(text))
    }

    #[test]
    fn test_scan_basic_phrases() {
        let result = scan(
            r#"
  # aws_instance.a will be created
  # aws_instance.b will be updated in-place
  # aws_instance.c will be destroyed
  # aws_instance.d must be replaced
"#,
        );

        assert_eq!(result.addresses(HeaderPhrase::Created), vec!["aws_instance.a"]);
        assert_eq!(result.addresses(HeaderPhrase::UpdatedInPlace), vec!["aws_instance.b"]);
        assert_eq!(result.addresses(HeaderPhrase::Destroyed), vec!["aws_instance.c"]);
        assert_eq!(result.addresses(HeaderPhrase::Replaced), vec!["aws_instance.d"]);
    }

    #[test]
    fn test_tainted_checked_before_replaced() {
        let result = scan("  # aws_instance.web is tainted, so must be replaced\n");

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].phrase, HeaderPhrase::TaintedReplaced);
        assert_eq!(result.matches[0].address, "aws_instance.web");
        assert!(result.addresses(HeaderPhrase::Replaced).is_empty());
    }

    #[test]
    fn test_drift_phrases() {
        let result = scan(
            r#"
  # aws_instance.a has been changed
  # aws_instance.b has changed
  # aws_instance.c has been deleted
  # aws_instance.d has been destroyed
"#,
        );

        let changed: Vec<&str> = result
            .by_action(ActionKind::DriftChanged)
            .map(|m| m.address.as_str())
            .collect();
        let deleted: Vec<&str> = result
            .by_action(ActionKind::DriftDeleted)
            .map(|m| m.address.as_str())
            .collect();

        assert_eq!(changed, vec!["aws_instance.a", "aws_instance.b"]);
        assert_eq!(deleted, vec!["aws_instance.c", "aws_instance.d"]);
    }

    #[test]
    fn test_quoted_and_module_addresses() {
        let result = scan(
            r#"
  # module.app["blue"].aws_instance.web[0] will be created
  # aws_s3_bucket.logs["us-east-1"] will be destroyed
"#,
        );

        assert_eq!(
            result.addresses(HeaderPhrase::Created),
            vec![r#"module.app["blue"].aws_instance.web[0]"#]
        );
        assert_eq!(
            result.addresses(HeaderPhrase::Destroyed),
            vec![r#"aws_s3_bucket.logs["us-east-1"]"#]
        );
    }

    #[test]
    fn test_unknown_phrase_ignored() {
        let result = scan(
            r#"
  # aws_instance.a will be teleported
  # data.aws_ami.latest will be read during apply
  # aws_instance.b will be crated
"#,
        );

        assert!(result.is_empty());
    }

    #[test]
    fn test_repeated_address_not_deduplicated() {
        let result = scan("# x will be created\n# x will be created\n");
        assert_eq!(result.addresses(HeaderPhrase::Created), vec!["x", "x"]);
    }

    #[test]
    fn test_nested_comments_are_not_headers() {
        let result = scan("        # aws_instance.a will be created\n");
        assert!(result.is_empty());
    }

    #[test]
    fn test_phrase_text_is_exact() {
        let result = scan("# aws_instance.a Will Be Created\n# aws_instance.b will be created  \n");
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].address, "aws_instance.b");
    }

    #[test]
    fn test_deposed_object_address() {
        let result = scan("  # aws_instance.a (deposed object 1a2b3c) will be destroyed\n");
        assert_eq!(
            result.addresses(HeaderPhrase::Destroyed),
            vec!["aws_instance.a (deposed object 1a2b3c)"]
        );
    }

    #[test]
    fn test_line_indices() {
        let result = scan("intro\n  # a will be created\n  + resource \"t\" \"a\" {\n");
        assert_eq!(result.matches[0].line, 1);
    }
}
