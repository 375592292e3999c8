//! PostgreSQL → MariaDB dialect rewriting.
//!
//! Each candidate statement is folded through an ordered list of textual
//! rewrite rules. The list order is a contract: later rules may depend on
//! the text shape left by earlier ones. The mapping is lossy best-effort
//! (sequence semantics are only approximated via placeholder tables and
//! auto-increment metadata); it is a compatibility layer, not a translator.

use once_cell::sync::Lazy;
use regex::Regex;

/// How a rule locates text inside a statement.
enum Matcher {
    /// Case-sensitive substring, replaced at every occurrence.
    Literal(&'static str),
    /// Compiled regular expression, replaced at every match.
    Pattern(Regex),
}

/// What a rule does with the matched text.
enum Action {
    /// Substitute the replacement text (`$1` refers to a capture group
    /// when the matcher is a pattern).
    Replace(&'static str),
    /// Delete the matched text.
    Remove,
    /// Prefix the matched text with a `-- ` marker, neutralizing it.
    CommentOut,
}

/// One ordered dialect-rewrite rule: a matcher plus a replacement policy.
pub struct RewriteRule {
    name: &'static str,
    matcher: Matcher,
    action: Action,
}

impl RewriteRule {
    fn literal(name: &'static str, needle: &'static str, action: Action) -> Self {
        Self {
            name,
            matcher: Matcher::Literal(needle),
            action,
        }
    }

    fn pattern(name: &'static str, pattern: &str, action: Action) -> Self {
        let re = Regex::new(pattern).expect("rewrite rule pattern must compile");
        Self {
            name,
            matcher: Matcher::Pattern(re),
            action,
        }
    }

    /// Rule name, for logs and tests.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply this rule to a statement. Text the rule does not match is
    /// returned unchanged.
    pub fn apply(&self, sql: &str) -> String {
        match &self.matcher {
            Matcher::Literal(needle) => match &self.action {
                Action::Replace(rep) => sql.replace(needle, rep),
                Action::Remove => sql.replace(needle, ""),
                Action::CommentOut => sql.replace(needle, &format!("-- {}", needle)),
            },
            Matcher::Pattern(re) => match &self.action {
                Action::Replace(rep) => re.replace_all(sql, *rep).into_owned(),
                Action::Remove => re.replace_all(sql, "").into_owned(),
                Action::CommentOut => re
                    .replace_all(sql, |caps: &regex::Captures| format!("-- {}", &caps[0]))
                    .into_owned(),
            },
        }
    }
}

/// The ordered rule table. Order is load-bearing and must not change.
pub static RULES: Lazy<Vec<RewriteRule>> = Lazy::new(|| {
    vec![
        // 1: ownership assignments have no MariaDB equivalent
        RewriteRule::literal("owner-to", "OWNER TO", Action::CommentOut),
        // 2: extensions are PostgreSQL-only
        RewriteRule::literal("create-extension", "CREATE EXTENSION", Action::CommentOut),
        // 3-4: session directives, meaningless on the target
        RewriteRule::pattern("search-path", r"SET search_path = .*?;", Action::Remove),
        RewriteRule::pattern(
            "set-config",
            r"SELECT pg_catalog\.set_config\(.*?\);",
            Action::Remove,
        ),
        // 5: sequences become placeholder tables named after the sequence,
        // so nextval lookups (rule 7) have a table to resolve against
        RewriteRule::pattern(
            "create-sequence",
            r#"CREATE SEQUENCE\s+(?:IF NOT EXISTS\s+)?([A-Za-z0-9_."]+)[^;]*;"#,
            Action::Replace("CREATE TABLE IF NOT EXISTS ${1} (sequence_value bigint NOT NULL);"),
        ),
        // 6: sequence tuning has no placeholder-table counterpart
        RewriteRule::literal("alter-sequence", "ALTER SEQUENCE", Action::CommentOut),
        // 7: approximate nextval via the target's auto-increment metadata
        RewriteRule::pattern(
            "nextval",
            r"(?i)nextval\('(.*?)'\)",
            Action::Replace(
                "(SELECT auto_increment FROM information_schema.tables WHERE table_name = '${1}')",
            ),
        ),
        // 8: serial-style defaults become native auto-increment
        RewriteRule::literal(
            "bigint-auto-increment",
            "bigint DEFAULT nextval",
            Action::Replace("bigint AUTO_INCREMENT"),
        ),
        // 9-12: type-name narrowing
        RewriteRule::literal("double-precision", "double precision", Action::Replace("DOUBLE")),
        RewriteRule::literal(
            "character-varying",
            "character varying",
            Action::Replace("VARCHAR"),
        ),
        RewriteRule::pattern(
            "timestamp-precision",
            r"timestamp\(\d+\)",
            Action::Replace("timestamp"),
        ),
        RewriteRule::literal("timestamptz", "timestamptz", Action::Replace("TIMESTAMP")),
        // 13: updated_at columns track row modification on the target
        RewriteRule::literal(
            "on-update-current-timestamp",
            "DEFAULT CURRENT_TIMESTAMP",
            Action::Replace("DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP"),
        ),
        // 14-15: function and type aliases
        RewriteRule::literal(
            "uuid-default",
            "DEFAULT gen_random_uuid()",
            Action::Replace("DEFAULT (UUID())"),
        ),
        RewriteRule::literal("jsonb", "jsonb", Action::Replace("JSON")),
        // 16-17: row-level security is PostgreSQL-only
        RewriteRule::pattern("create-policy", r"(?s)CREATE POLICY.*?;", Action::Remove),
        RewriteRule::pattern(
            "enable-row-level-security",
            r"(?s)ALTER TABLE.*?ENABLE ROW LEVEL SECURITY;",
            Action::Remove,
        ),
    ]
});

/// True when the statement still contains something the target can execute
/// (at least one line that is neither blank nor a `--` comment).
fn is_executable(stmt: &str) -> bool {
    stmt.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with("--")
    })
}

/// Rewrite one candidate statement to the MariaDB dialect.
///
/// Returns `None` when the statement should not be executed at all:
/// session-set directives, catalog config calls, and statements left empty
/// (or fully commented out) by the rules.
pub fn rewrite_statement(candidate: &str) -> Option<String> {
    let rewritten = RULES
        .iter()
        .fold(candidate.to_string(), |sql, rule| rule.apply(&sql));

    let trimmed = rewritten.trim();
    if trimmed.is_empty()
        || trimmed.starts_with("SET ")
        || trimmed.starts_with("SELECT pg_catalog.")
        || !is_executable(trimmed)
    {
        return None;
    }

    Some(trimmed.to_string())
}
