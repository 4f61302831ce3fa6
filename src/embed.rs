//! Formatting of resolved template text into HTML fragments.
//!
//! Pure string formatting over already-resolved input; the embedder has no
//! failure modes of its own.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Output format for an embedded template.
///
/// The mode only affects formatting; it never affects how a name resolves to
/// a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// `<script>` block registering the template string into `Mustache.TEMPLATES`
    Registered,
    /// `<script type="text/html">` block holding the raw markup, ICanHaz-style
    InlineDom,
    /// The unwrapped template text
    Raw,
}

impl RenderMode {
    /// The tag word used to invoke this mode
    pub fn tag_name(self) -> &'static str {
        match self {
            Self::Registered => "mustachejs",
            Self::InlineDom => "mustacheich",
            Self::Raw => "mustacheraw",
        }
    }
}

impl FromStr for RenderMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mustachejs" => Ok(Self::Registered),
            "mustacheich" => Ok(Self::InlineDom),
            "mustacheraw" => Ok(Self::Raw),
            other => Err(Error::syntax(format!("unknown tag: {other}"))),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// Format resolved template text as an HTML fragment in the given mode.
///
/// In `Registered` mode the content is escaped for inclusion inside a
/// single-quoted JavaScript string literal. In `InlineDom` mode the content
/// is embedded verbatim and `name` goes into the `id` attribute as-is, so it
/// must already be a safe identifier.
pub fn embed(name: &str, content: &str, mode: RenderMode) -> String {
    match mode {
        RenderMode::Registered => format!(
            "<script>Mustache.TEMPLATES=Mustache.TEMPLATES||{{}};\
             Mustache.TEMPLATES['{name}']='{}';</script>",
            escape_js_string(content)
        ),
        RenderMode::InlineDom => {
            format!("<script type=\"text/html\" id=\"{name}\">{content}</script>")
        }
        RenderMode::Raw => content.to_owned(),
    }
}

/// Escape text for a single-quoted JavaScript string literal.
///
/// Only backslash and single-quote are escaped. Newlines are left as literal
/// newlines, not rewritten to `\n` sequences.
fn escape_js_string(content: &str) -> String {
    content.replace('\\', "\\\\").replace('\'', "\\'")
}
