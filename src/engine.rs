//! Tera integration.
//!
//! Registers one global function per render mode so server-side Tera pages
//! can pull client-side templates in with `{{ mustachejs(name="widget") }}`,
//! `{{ mustacheich(name="widget") }}` or `{{ mustacheraw(name="widget") }}`.
//! The functions hold a shared [`Config`] and apply the same debug policy as
//! [`Tag::render`](crate::tag::Tag::render).

use std::collections::HashMap;
use std::sync::Arc;

use tera::{Tera, Value};
use tracing::debug;

use crate::config::Config;
use crate::embed::{RenderMode, embed};
use crate::error::Error;
use crate::loading;

/// Global Tera function embedding one template in a fixed render mode
struct EmbedFunction {
    config: Arc<Config>,
    mode: RenderMode,
}

impl tera::Function for EmbedFunction {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let name = match args.get("name") {
            Some(Value::String(name)) => name,
            Some(_) => {
                return Err(tera::Error::msg(format!(
                    "`{}`: the `name` argument must be a string",
                    self.mode.tag_name()
                )));
            }
            None => {
                return Err(tera::Error::msg(format!(
                    "`{}` requires a `name` argument",
                    self.mode.tag_name()
                )));
            }
        };
        if args.len() > 1 {
            return Err(tera::Error::msg(format!(
                "`{}` takes only a `name` argument",
                self.mode.tag_name()
            )));
        }

        match loading::resolve(name, &self.config.dirs) {
            Ok(content) => Ok(Value::String(embed(name, &content, self.mode))),
            Err(Error::TemplateNotFound(_)) if !self.config.debug => {
                debug!(name = %name, "suppressed missing template in non-debug mode");
                Ok(Value::String(String::new()))
            }
            Err(e) => Err(tera::Error::msg(e.to_string())),
        }
    }

    // Output is a <script> fragment, never autoescape it
    fn is_safe(&self) -> bool {
        true
    }
}

/// Install the `mustachejs`, `mustacheich` and `mustacheraw` functions
pub fn register_functions(tera: &mut Tera, config: Arc<Config>) {
    for mode in [RenderMode::Registered, RenderMode::InlineDom, RenderMode::Raw] {
        tera.register_function(
            mode.tag_name(),
            EmbedFunction {
                config: Arc::clone(&config),
                mode,
            },
        );
    }
}
