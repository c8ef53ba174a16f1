//! Immutable, ordered rule tables used by the classifier.
//!
//! Two kinds of rule live here:
//!
//! | Rule | Technique | Used for |
//! |------|-----------|----------|
//! | [`PhraseTable`] | "verb name" containment via [`aho_corasick`] | curated site and app lists |
//! | [`PatternRule`] | compiled [`regex`] with an optional capture guard | generic fallback rules |
//!
//! Every table is built once and never patched afterwards, so the priority
//! order is exactly the declaration order below.

use aho_corasick::AhoCorasick;
use regex::Regex;

use crate::error::{IntentError, Result};
use crate::intent::IntentKind;

// ---------------------------------------------------------------------------
// Built-in tables
// ---------------------------------------------------------------------------

/// Phrases that ask for a blank browser tab.
pub const NEW_TAB_PHRASES: &[&str] = &["new tab", "open tab", "blank tab"];

/// Curated website names, in priority order.
pub const KNOWN_WEBSITES: &[&str] = &[
    "youtube",
    "gmail",
    "github",
    "reddit",
    "twitter",
    "facebook",
    "linkedin",
    "instagram",
    "netflix",
    "amazon",
    "google",
    "wikipedia",
    "stackoverflow",
    "medium",
    "twitch",
    "discord",
    "spotify",
];

/// Verbs that may precede a curated website name.
pub const WEBSITE_VERBS: &[&str] = &["open", "go to", "show me", "visit"];

/// Curated application names, in priority order.
pub const KNOWN_APPLICATIONS: &[&str] = &[
    "chrome",
    "firefox",
    "edge",
    "vscode",
    "terminal",
    "notepad",
    "calculator",
];

/// Verbs that may precede a curated application name.
pub const APPLICATION_VERBS: &[&str] = &["open", "launch", "start"];

/// Static description of one regex rule.
struct RuleSpec {
    kind: IntentKind,
    pattern: &'static str,
    /// When set, a match whose first capture matches this regex is rejected.
    guard: Option<&'static str>,
}

const fn rule(kind: IntentKind, pattern: &'static str) -> RuleSpec {
    RuleSpec {
        kind,
        pattern,
        guard: None,
    }
}

/// The regex rule groups.  Groups and the rules inside them are tried in
/// this exact order; the first match anywhere wins.
const PATTERN_RULES: &[RuleSpec] = &[
    // open_application
    rule(IntentKind::OpenApplication, r"(?:open|launch|start)\s+(\w+)"),
    rule(
        IntentKind::OpenApplication,
        r"(?:can you |please )?(?:open|launch|start)\s+(\w+)",
    ),
    rule(
        IntentKind::OpenApplication,
        r"i (?:want to |need to )?(?:open|launch|start)\s+(\w+)",
    ),
    // close_application
    rule(IntentKind::CloseApplication, r"(?:close|quit|exit|kill)\s+(\w+)"),
    rule(
        IntentKind::CloseApplication,
        r"(?:can you |please )?(?:close|quit|exit)\s+(\w+)",
    ),
    // web_search
    rule(
        IntentKind::WebSearch,
        r"(?:search|google|look up|find)\s+(?:for\s+)?(.+)",
    ),
    rule(
        IntentKind::WebSearch,
        r"(?:can you |please )?(?:search|google)\s+(?:for\s+)?(.+)",
    ),
    rule(
        IntentKind::WebSearch,
        r"i (?:want to |need to )?(?:search|google)\s+(?:for\s+)?(.+)",
    ),
    // open_website
    rule(IntentKind::OpenWebsite, r"(?:open|new)\s+(?:a\s+)?(?:new\s+)?tab"),
    rule(
        IntentKind::OpenWebsite,
        r"(?:go to|open|navigate to|visit)\s+(?:website\s+)?(.+)",
    ),
    rule(
        IntentKind::OpenWebsite,
        r"(?:can you |please )?(?:go to|open)\s+(?:website\s+)?(.+)",
    ),
    rule(IntentKind::OpenWebsite, r"show me\s+(.+)"),
    rule(IntentKind::OpenWebsite, r"take me to\s+(.+)"),
    // file_operation
    rule(
        IntentKind::FileOperation,
        r"(?:create|make)\s+(?:a\s+)?file\s+(?:called\s+)?(.+)",
    ),
    rule(
        IntentKind::FileOperation,
        r"(?:delete|remove)\s+(?:the\s+)?file\s+(.+)",
    ),
    rule(IntentKind::FileOperation, r"open\s+(?:the\s+)?file\s+(.+)"),
    // system_control
    rule(IntentKind::SystemControl, r"(?:turn\s+)?volume\s+(up|down)"),
    rule(
        IntentKind::SystemControl,
        r"(?:set\s+)?brightness\s+(?:to\s+)?(\d+)",
    ),
    rule(
        IntentKind::SystemControl,
        r"(?:take|capture)\s+(?:a\s+)?screenshot",
    ),
    // information
    RuleSpec {
        kind: IntentKind::Information,
        pattern: r"what(?:'s|\s+is)\s+(.+)",
        // "what is the time" belongs to time_date further down.
        guard: Some(r"^the\s+(?:time|date)"),
    },
    rule(IntentKind::Information, r"tell\s+me\s+(?:about\s+)?(.+)"),
    rule(IntentKind::Information, r"who\s+(?:is|was|are)\s+(.+)"),
    rule(IntentKind::Information, r"how\s+(?:are\s+)?you"),
    rule(IntentKind::Information, r"(?:what's\s+)?your\s+name"),
    rule(IntentKind::Information, r"(?:can\s+you\s+)?help(?:\s+me)?"),
    rule(IntentKind::Information, r"thank(?:s|\s+you)"),
    rule(IntentKind::Information, r"what\s+can\s+you\s+do"),
    // time_date
    rule(IntentKind::TimeDate, r"what(?:'s|\s+is)\s+(?:the\s+)?time"),
    rule(IntentKind::TimeDate, r"what\s+time\s+is\s+it"),
    rule(
        IntentKind::TimeDate,
        r"what(?:'s|\s+is)\s+(?:the\s+)?(?:date|day)",
    ),
    rule(IntentKind::TimeDate, r"what\s+day\s+is\s+(?:it|today)"),
    rule(
        IntentKind::TimeDate,
        r"(?:tell me |give me )(?:the\s+)?(?:time|date)",
    ),
    rule(IntentKind::TimeDate, r"current\s+(?:time|date)"),
];

// ---------------------------------------------------------------------------
// RuleMatch
// ---------------------------------------------------------------------------

/// The outcome of a successful rule probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// The intent kind the rule is tagged with.
    pub kind: IntentKind,
    /// The first capture, when the rule has one and it participated.
    pub target: Option<String>,
}

// ---------------------------------------------------------------------------
// PhraseTable
// ---------------------------------------------------------------------------

/// A curated list of names, each reachable through a fixed set of verbs.
///
/// Probing reports the name that appears *earliest in the list* among all
/// "verb name" phrases contained in the text, regardless of where in the
/// text the phrase sits.
pub struct PhraseTable {
    kind: IntentKind,
    names: &'static [&'static str],
    automaton: AhoCorasick,
    /// Automaton pattern index -> index into `names`.
    owners: Vec<usize>,
}

impl PhraseTable {
    /// Build a table tagged with `kind` from `verbs` x `names`.
    pub fn new(
        kind: IntentKind,
        verbs: &[&str],
        names: &'static [&'static str],
    ) -> Result<Self> {
        let mut phrases = Vec::with_capacity(verbs.len() * names.len());
        let mut owners = Vec::with_capacity(verbs.len() * names.len());

        for (idx, name) in names.iter().enumerate() {
            for verb in verbs {
                phrases.push(format!("{verb} {name}"));
                owners.push(idx);
            }
        }

        let automaton =
            AhoCorasick::new(&phrases).map_err(|e| IntentError::PhraseTableBuild {
                reason: e.to_string(),
            })?;

        tracing::trace!(kind = %kind, phrases = phrases.len(), "phrase table built");

        Ok(Self {
            kind,
            names,
            automaton,
            owners,
        })
    }

    /// The intent kind this table resolves to.
    pub fn kind(&self) -> IntentKind {
        self.kind
    }

    /// Find the highest-priority name whose phrase occurs in `lowered`.
    pub fn find(&self, lowered: &str) -> Option<&'static str> {
        self.automaton
            .find_overlapping_iter(lowered)
            .map(|mat| self.owners[mat.pattern().as_usize()])
            .min()
            .map(|idx| self.names[idx])
    }

    /// Probe the table and convert a hit into a [`RuleMatch`].
    pub fn probe(&self, lowered: &str) -> Option<RuleMatch> {
        self.find(lowered).map(|name| RuleMatch {
            kind: self.kind,
            target: Some(name.to_owned()),
        })
    }
}

// ---------------------------------------------------------------------------
// PatternRule
// ---------------------------------------------------------------------------

/// A regex rule tagged with the intent kind it produces.
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// The intent kind produced on match.
    pub kind: IntentKind,
    /// The original pattern string, kept for diagnostics.
    pub pattern: String,
    compiled: Regex,
    guard: Option<Regex>,
}

impl PatternRule {
    /// Compile a case-insensitive rule.
    pub fn new(kind: IntentKind, pattern: &str) -> Result<Self> {
        Ok(Self {
            kind,
            pattern: pattern.to_owned(),
            compiled: compile(&format!("(?i){pattern}"))?,
            guard: None,
        })
    }

    /// Attach a capture guard: matches whose first capture matches `guard`
    /// are skipped and the search resumes after the rejected start.
    pub fn with_guard(mut self, guard: &str) -> Result<Self> {
        self.guard = Some(compile(&format!("(?i){guard}"))?);
        Ok(self)
    }

    /// Search `lowered` for the first acceptable match.
    pub fn probe(&self, lowered: &str) -> Option<RuleMatch> {
        let mut start = 0;

        while start <= lowered.len() {
            let caps = self.compiled.captures_at(lowered, start)?;
            let target = caps.get(1).map(|m| m.as_str());

            match (&self.guard, target) {
                (Some(guard), Some(captured)) if guard.is_match(captured) => {
                    let whole = caps.get(0)?;
                    let step = lowered[whole.start()..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
                    start = whole.start() + step;
                }
                _ => {
                    return Some(RuleMatch {
                        kind: self.kind,
                        target: target.map(str::to_owned),
                    });
                }
            }
        }

        None
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| IntentError::InvalidPattern {
        pattern: pattern.to_owned(),
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// RuleSet
// ---------------------------------------------------------------------------

/// The ordered list of regex rules, flattened across groups.
pub struct RuleSet {
    rules: Vec<PatternRule>,
}

impl RuleSet {
    /// Compile the built-in rule groups.
    pub fn builtin() -> Result<Self> {
        let rules = PATTERN_RULES
            .iter()
            .map(|spec| {
                let rule = PatternRule::new(spec.kind, spec.pattern)?;
                match spec.guard {
                    Some(guard) => rule.with_guard(guard),
                    None => Ok(rule),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Return the first rule (in table order) that matches.
    pub fn first_match(&self, lowered: &str) -> Option<RuleMatch> {
        self.rules.iter().find_map(|rule| {
            let hit = rule.probe(lowered)?;
            tracing::trace!(pattern = %rule.pattern, kind = %hit.kind, "pattern rule matched");
            Some(hit)
        })
    }

    /// Number of compiled rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate the rules in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
