//! Rewriting of lightweight docstring annotation tags into HTML markup.
//!
//! Both Epydoc (`@param`) and Sphinx (`:param`) spellings are understood; a rewrite is
//! configured with exactly one [`Delimiter`]. Recognized tags:
//!
//! | Tag                              | Emitted as                                    |
//! |----------------------------------|-----------------------------------------------|
//! | `param` + `type`                 | `<b>name</b> (<b><i>type</i></b>): text</br>` |
//! | `return`/`returns` (+ `rtype`)   | `<b>returns:</b> text</br>`                   |
//! | `rtype` alone                    | `<b>return type:</b> type</br>`               |
//! | `raise`/`raises`                 | `<b>raises:</b> text</br>`                    |
//!
//! Any other line is copied through byte-for-byte.

pub mod markup;
pub mod rewriter;
pub mod tag;

pub use rewriter::{AnnotationError, AnnotationRewriter, RewriteOptions, RewriteStats};
pub use tag::{Delimiter, LineKind, Tag, TagKind, classify_line};
