//! Embed client-side Mustache/ICanHaz templates into server-rendered pages.
//!
//! Template files live under an ordered allow-list of directories and are
//! looked up by logical name at render time, with absolute paths, `..`
//! escapes and escaping symlinks all treated as "not found". Resolved
//! content is formatted in one of three modes: a `<script>` block that
//! registers the template string into `Mustache.TEMPLATES` (with
//! JavaScript-string escaping), an ICanHaz-style
//! `<script type="text/html">` block, or the raw text.
//!
//! The [`tag`] module parses and renders tag invocations directly; the
//! [`engine`] module registers the three tags as global Tera functions.
//!
//! # Example
//!
//! ```
//! use mustache_embed::{Config, RenderContext, Tag};
//!
//! let config = Config::new(vec!["jstemplates".into()], false);
//! let tag = Tag::parse("mustachejs 'welcome'")?;
//! // outside debug mode a missing template renders as an empty fragment
//! assert_eq!(tag.render(&config, &RenderContext::new())?, "");
//! # Ok::<(), mustache_embed::Error>(())
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod embed;
pub mod engine;
pub mod error;
pub mod loading;
pub mod tag;

pub use config::Config;
pub use embed::{RenderMode, embed};
pub use engine::register_functions;
pub use error::{Error, Result};
pub use tag::{NameExpr, RenderContext, Tag};
