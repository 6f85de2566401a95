//! Skip rule matching for excluding packages from the check
//!
//! Three rule flavors, decided per rule:
//! - exact package name (`lodash`)
//! - glob with `*`/`?` wildcards (`@types/*`)
//! - full regex, detected by regex metacharacters beyond the glob
//!   wildcards (`^@internal/.+$`)
//!
//! A package is skipped when ANY rule matches. A rule that looks like
//! a regex but fails to compile degrades to a substring-containment
//! test instead of aborting the run.

use regex::Regex;

/// Regex metacharacters that promote a rule to the regex flavor once
/// glob wildcards are set aside
const REGEX_METACHARS: &[char] = &['.', '+', '^', '$', '{', '}', '(', ')', '|', '[', ']'];

/// A single compiled skip rule
#[derive(Debug)]
enum CompiledRule {
    /// Exact string equality
    Exact(String),
    /// Compiled pattern (glob rules are translated to anchored regex)
    Pattern(Regex),
    /// Fallback for rules that failed to compile as regex
    Substring(String),
}

impl CompiledRule {
    fn matches(&self, package: &str) -> bool {
        match self {
            CompiledRule::Exact(name) => package == name,
            CompiledRule::Pattern(regex) => regex.is_match(package),
            CompiledRule::Substring(text) => package.contains(text.as_str()),
        }
    }
}

/// Matcher over a set of skip rules, compiled once per run
#[derive(Debug, Default)]
pub struct SkipMatcher {
    rules: Vec<CompiledRule>,
}

impl SkipMatcher {
    /// Compiles a rule list into a matcher
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .map(|p| compile_rule(p.as_ref()))
            .collect();
        Self { rules }
    }

    /// Creates a matcher that skips nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true when any rule matches the package name
    pub fn matches(&self, package: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(package))
    }

    /// Returns true when no rules are configured
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn compile_rule(pattern: &str) -> CompiledRule {
    let without_wildcards: String = pattern.chars().filter(|c| !matches!(c, '*' | '?')).collect();

    if without_wildcards.contains(REGEX_METACHARS) {
        // Regex flavor; a broken pattern falls back to substring
        // containment instead of propagating the error
        match Regex::new(pattern) {
            Ok(regex) => CompiledRule::Pattern(regex),
            Err(_) => CompiledRule::Substring(pattern.to_string()),
        }
    } else if pattern.contains(['*', '?']) {
        match Regex::new(&glob_to_regex(pattern)) {
            Ok(regex) => CompiledRule::Pattern(regex),
            Err(_) => CompiledRule::Substring(pattern.to_string()),
        }
    } else {
        CompiledRule::Exact(pattern.to_string())
    }
}

/// Translates a glob into an anchored regex: metacharacters are
/// escaped, `*` becomes `.*`, `?` becomes `.`
fn glob_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 2);
    regex.push('^');
    for c in pattern.chars() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            c if REGEX_METACHARS.contains(&c) || c == '\\' => {
                regex.push('\\');
                regex.push(c);
            }
            c => regex.push(c),
        }
    }
    regex.push('$');
    regex
}
