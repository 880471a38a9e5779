//! Reply framing for the board's line-oriented console.
//!
//! After each command the board prints its output followed by a `>` prompt
//! at the start of a line. Depending on firmware settings the command line
//! itself may be echoed first.

use crate::error::LinkError;

/// Prompt byte the board prints when it is ready for the next command.
pub const PROMPT: u8 = b'>';

/// True once `buf` ends with a prompt at the start of a line.
pub fn ends_with_prompt(buf: &[u8]) -> bool {
    match buf {
        [PROMPT]                  => true,
        [.., b'\n', PROMPT]       => true,
        [.., b'\r', PROMPT]       => true,
        _                         => false,
    }
}

/// Strip the prompt, the echoed command and blank lines from a raw reply.
pub fn clean_reply(command: &str, raw: &str) -> String {
    let body = raw.strip_suffix('>').unwrap_or(raw);
    body.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && *l != command)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse an integer reply, failing fast on anything else.
pub fn parse_int(command: &str, reply: &str) -> Result<i32, LinkError> {
    reply.trim().parse::<i32>().map_err(|_| LinkError::MalformedReply {
        command: command.to_string(),
        reply:   reply.to_string(),
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
