//! Tag parsing and rendering.
//!
//! A tag is the full invocation text, e.g. `mustachejs 'testtemplate'`: the
//! tag word picks the [`RenderMode`] and the single argument names the
//! template, either as a quoted literal or as a bare variable looked up in
//! the [`RenderContext`] at render time. Argument-count mistakes are caught
//! here, at parse time, independent of any runtime configuration.

use std::collections::HashMap;

use tracing::debug;

use crate::config::Config;
use crate::embed::{RenderMode, embed};
use crate::error::{Error, Result};
use crate::loading;

/// A template name argument: quoted literal or variable reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameExpr {
    /// A quoted template name, used as-is
    Literal(String),
    /// A bare identifier resolved against the render context
    Variable(String),
}

impl NameExpr {
    /// Parse a single tag argument.
    ///
    /// Quoted (single or double) arguments become literals; anything else is
    /// a variable reference. An empty literal is a syntax error.
    pub fn parse(arg: &str) -> Result<Self> {
        let mut chars = arg.chars();
        match (chars.next(), chars.next_back()) {
            (Some(open @ ('\'' | '"')), Some(close)) if open == close => {
                let inner = &arg[1..arg.len() - 1];
                if inner.is_empty() {
                    return Err(Error::syntax("template name must not be empty"));
                }
                Ok(Self::Literal(inner.to_owned()))
            }
            (Some('\'' | '"'), _) => {
                Err(Error::syntax(format!("unterminated quote in argument: {arg}")))
            }
            (Some(_), _) => Ok(Self::Variable(arg.to_owned())),
            (None, _) => Err(Error::syntax("template name must not be empty")),
        }
    }

    /// Resolve this expression to a concrete template name.
    ///
    /// A variable missing from the context behaves exactly like a missing
    /// template: suppressed in production, surfaced in debug.
    fn resolve(&self, context: &RenderContext) -> Result<String> {
        match self {
            Self::Literal(name) => Ok(name.clone()),
            Self::Variable(var) => context
                .get(var)
                .map(str::to_owned)
                .ok_or_else(|| Error::not_found(var.clone())),
        }
    }
}

/// Variable bindings available to a tag at render time
#[derive(Debug, Default, Clone)]
pub struct RenderContext {
    vars: HashMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable name to a template name
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, var: K, value: V) {
        self.vars.insert(var.into(), value.into());
    }

    pub fn get(&self, var: &str) -> Option<&str> {
        self.vars.get(var).map(String::as_str)
    }
}

/// A parsed template tag, ready to render against a configuration and context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    mode: RenderMode,
    name: NameExpr,
}

impl Tag {
    pub fn new(mode: RenderMode, name: NameExpr) -> Self {
        Self { mode, name }
    }

    /// Parse a full tag invocation such as `mustacheich templatename`.
    ///
    /// Exactly one argument is required; zero or several is a syntax error
    /// regardless of the debug flag.
    pub fn parse(contents: &str) -> Result<Self> {
        let bits = split_contents(contents)?;
        let [tag_word, arg] = bits.as_slice() else {
            let tag_word = bits.first().map_or("template", String::as_str);
            return Err(Error::syntax(format!(
                "{tag_word} tag takes exactly one argument"
            )));
        };

        let mode = tag_word.parse::<RenderMode>()?;
        let name = NameExpr::parse(arg)?;
        Ok(Self { mode, name })
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn name(&self) -> &NameExpr {
        &self.name
    }

    /// Render this tag to an HTML fragment.
    ///
    /// When `config.debug` is false an unresolvable template renders as an
    /// empty string so a missing file never breaks page rendering; when true
    /// the [`Error::TemplateNotFound`] propagates. Read errors on a file that
    /// was found are never suppressed.
    pub fn render(&self, config: &Config, context: &RenderContext) -> Result<String> {
        match self.render_resolved(config, context) {
            Err(Error::TemplateNotFound(name)) if !config.debug => {
                debug!(name = %name, "suppressed missing template in non-debug mode");
                Ok(String::new())
            }
            other => other,
        }
    }

    fn render_resolved(&self, config: &Config, context: &RenderContext) -> Result<String> {
        let name = self.name.resolve(context)?;
        let content = loading::resolve(&name, &config.dirs)?;
        Ok(embed(&name, &content, self.mode))
    }
}

/// Split tag contents on whitespace, keeping quoted runs together
fn split_contents(contents: &str) -> Result<Vec<String>> {
    let mut bits = Vec::new();
    let mut rest = contents.trim_start();
    while let Some(first) = rest.chars().next() {
        let end = if first == '\'' || first == '"' {
            match rest[1..].find(first) {
                Some(i) => i + 2,
                None => {
                    return Err(Error::syntax(format!(
                        "unterminated quote in tag: {contents}"
                    )));
                }
            }
        } else {
            rest.find(char::is_whitespace).unwrap_or(rest.len())
        };
        bits.push(rest[..end].to_owned());
        rest = rest[end..].trim_start();
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    fn config_with(dir: &TempDir, debug: bool) -> Config {
        Config::new(vec![dir.path().to_path_buf()], debug)
    }

    #[test]
    fn test_parse_literal_argument() {
        let tag = Tag::parse("mustachejs 'testtemplate'").unwrap();
        assert_eq!(tag.mode(), RenderMode::Registered);
        assert_eq!(tag.name(), &NameExpr::Literal("testtemplate".to_owned()));
    }

    #[test]
    fn test_parse_double_quoted_literal() {
        let tag = Tag::parse("mustacheraw \"widgets/list\"").unwrap();
        assert_eq!(tag.mode(), RenderMode::Raw);
        assert_eq!(tag.name(), &NameExpr::Literal("widgets/list".to_owned()));
    }

    #[test]
    fn test_parse_variable_argument() {
        let tag = Tag::parse("mustacheich templatename").unwrap();
        assert_eq!(tag.mode(), RenderMode::InlineDom);
        assert_eq!(tag.name(), &NameExpr::Variable("templatename".to_owned()));
    }

    #[test]
    fn test_parse_zero_arguments_is_syntax_error() {
        let result = Tag::parse("mustachejs");
        let error = result.unwrap_err();
        assert!(matches!(error, Error::Syntax(_)));
        assert_eq!(
            error.to_string(),
            "syntax error: mustachejs tag takes exactly one argument"
        );
    }

    #[test]
    fn test_parse_empty_contents_is_syntax_error() {
        let result = Tag::parse("");
        let error = result.unwrap_err();
        assert!(matches!(error, Error::Syntax(_)));
        assert_eq!(
            error.to_string(),
            "syntax error: template tag takes exactly one argument"
        );
    }

    #[test]
    fn test_parse_two_arguments_is_syntax_error() {
        let result = Tag::parse("mustachejs 'one' 'two'");
        assert!(matches!(result.unwrap_err(), Error::Syntax(_)));
    }

    #[test]
    fn test_parse_unknown_tag_word_is_syntax_error() {
        let result = Tag::parse("mustache 'one'");
        assert!(matches!(result.unwrap_err(), Error::Syntax(_)));
    }

    #[test]
    fn test_parse_unterminated_quote_is_syntax_error() {
        let result = Tag::parse("mustachejs 'broken");
        assert!(matches!(result.unwrap_err(), Error::Syntax(_)));
    }

    #[test]
    fn test_parse_empty_literal_is_syntax_error() {
        let result = Tag::parse("mustachejs ''");
        assert!(matches!(result.unwrap_err(), Error::Syntax(_)));
    }

    #[test]
    fn test_parse_quoted_name_with_space() {
        let tag = Tag::parse("mustacheraw 'spaced name'").unwrap();
        assert_eq!(tag.name(), &NameExpr::Literal("spaced name".to_owned()));
    }

    #[test]
    fn test_render_literal_tag() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("widget"), "<p>hi</p>").unwrap();

        let tag = Tag::parse("mustacheraw 'widget'").unwrap();
        let out = tag.render(&config_with(&dir, false), &RenderContext::new()).unwrap();
        assert_eq!(out, "<p>hi</p>");
    }

    #[test]
    fn test_render_variable_tag() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("widget"), "<p>hi</p>").unwrap();

        let mut context = RenderContext::new();
        context.insert("templatename", "widget");

        let tag = Tag::parse("mustacheraw templatename").unwrap();
        let out = tag.render(&config_with(&dir, false), &context).unwrap();
        assert_eq!(out, "<p>hi</p>");
    }

    #[test]
    #[traced_test]
    fn test_render_missing_template_suppressed_without_debug() {
        let dir = TempDir::new().unwrap();
        let tag = Tag::parse("mustachejs 'notemplate'").unwrap();

        let out = tag.render(&config_with(&dir, false), &RenderContext::new()).unwrap();
        assert_eq!(out, "");
        assert!(logs_contain("suppressed missing template"));
    }

    #[test]
    fn test_render_missing_template_raises_with_debug() {
        let dir = TempDir::new().unwrap();
        let tag = Tag::parse("mustachejs 'notemplate'").unwrap();

        let result = tag.render(&config_with(&dir, true), &RenderContext::new());
        assert!(matches!(result.unwrap_err(), Error::TemplateNotFound(_)));
    }

    #[test]
    fn test_render_unbound_variable_follows_debug_policy() {
        let dir = TempDir::new().unwrap();
        let tag = Tag::parse("mustachejs templatename").unwrap();

        let out = tag.render(&config_with(&dir, false), &RenderContext::new()).unwrap();
        assert_eq!(out, "");

        let result = tag.render(&config_with(&dir, true), &RenderContext::new());
        assert!(matches!(result.unwrap_err(), Error::TemplateNotFound(_)));
    }

    #[test]
    fn test_render_traversal_name_is_empty_in_production() {
        let outer = TempDir::new().unwrap();
        fs::write(outer.path().join("outside_dir"), "secret").unwrap();
        let inner = outer.path().join("templates");
        fs::create_dir(&inner).unwrap();

        let config = Config::new(vec![PathBuf::from(&inner)], false);
        let tag = Tag::parse("mustachejs '../outside_dir'").unwrap();

        let out = tag.render(&config, &RenderContext::new()).unwrap();
        assert_eq!(out, "");
    }

    #[cfg(unix)]
    #[test]
    fn test_render_unreadable_template_is_never_suppressed() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("widget");
        fs::write(&path, "<p>hi</p>").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_to_string(&path).is_ok() {
            // running as root, permissions are not enforced
            return;
        }

        let tag = Tag::parse("mustacheraw 'widget'").unwrap();
        let result = tag.render(&config_with(&dir, false), &RenderContext::new());
        assert!(matches!(result.unwrap_err(), Error::Io { .. }));
    }
}
