//! Command invocations and the argument grammar
//!
//! An [`Invocation`] is one user-triggered command execution: who asked, from
//! where, and the raw argument text. Argument text is kept byte-for-byte as
//! typed (including the whitespace separating it from the command name) so
//! that content-bearing commands can pass it on verbatim.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use uuid::Uuid;

/// One command execution. Immutable once built.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Correlates every log line of this execution.
    pub request_id: Uuid,
    pub author_id: u64,
    pub author_roles: Vec<u64>,
    pub guild_id: u64,
    pub channel_id: u64,
    /// The invoking message itself (removed best-effort by most commands).
    pub message_id: u64,
    pub command: String,
    /// Raw argument text, verbatim, including leading whitespace.
    rest: String,
}

impl Invocation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        author_id: u64,
        author_roles: Vec<u64>,
        guild_id: u64,
        channel_id: u64,
        message_id: u64,
        command: String,
        rest: String,
    ) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            author_id,
            author_roles,
            guild_id,
            channel_id,
            message_id,
            command,
            rest,
        }
    }

    /// Consume up to `max` leading all-digit tokens as identifiers.
    ///
    /// Returns the identifiers and the remaining text, untouched from the
    /// first non-identifier token on (its leading whitespace included). A
    /// token that is not purely digits, or does not fit in a `u64`, stops the
    /// scan and stays part of the remainder.
    pub fn leading_ids(&self, max: usize) -> (Vec<u64>, &str) {
        let mut ids = Vec::new();
        let mut rest = self.rest.as_str();

        while ids.len() < max {
            let body = rest.trim_start();
            let end = body
                .find(char::is_whitespace)
                .unwrap_or(body.len());
            let token = &body[..end];
            if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
                break;
            }
            let Ok(id) = token.parse::<u64>() else {
                break;
            };
            ids.push(id);
            rest = &body[end..];
        }

        (ids, rest)
    }

    /// The argument text as content: `None` when nothing but whitespace is
    /// left, which triggers the interactive prompt.
    pub fn content_arg(rest: &str) -> Option<&str> {
        (!rest.trim().is_empty()).then_some(rest)
    }
}

/// Split `content` into a command name and its raw argument text.
///
/// Returns `None` when the prefix does not match or nothing follows it. The
/// command name is lowercased; the argument text starts at the whitespace
/// right after the command name.
pub fn split_command<'a>(prefix: &str, content: &'a str) -> Option<(String, &'a str)> {
    let body = content.strip_prefix(prefix)?;
    let end = body.find(char::is_whitespace).unwrap_or(body.len());
    let command = &body[..end];
    if command.is_empty() {
        return None;
    }
    Some((command.to_ascii_lowercase(), &body[end..]))
}
