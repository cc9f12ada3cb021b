//! Line-oriented rewriting of annotation tags into HTML markup.
//!
//! Consecutive tag lines form a *run*. A run is resolved as a whole once a blank line, a plain
//! line, or the end of input is reached, which lets a `param` tag find its `type` tag no matter
//! which of the two comes first. Everything outside a run is copied through untouched.

use std::io::{BufRead, Write};

use super::markup;
use super::tag::{Delimiter, LineKind, Tag, classify_line};

/// Errors raised while rewriting annotation tags
#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    /// A parameter or return tag has no companion type tag
    #[error("Missing type specification for '{name}' (line {line})")]
    MissingTypeSpec { name: String, line: usize },

    /// A type tag names a parameter that has no parameter tag
    #[error("Type given for '{name}' but no matching parameter tag (line {line})")]
    TypeWithoutParam { name: String, line: usize },

    /// A type tag follows a parameter tag with a different name
    #[error("Type given for '{type_name}' does not match parameter '{param}' (line {line})")]
    ParamTypeMismatch {
        param: String,
        type_name: String,
        line: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rewriter settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOptions {
    pub delimiter: Delimiter,
    /// Require every parameter and return tag to carry a type
    pub force_type_spec: bool,
}

/// Counters reported after a rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    pub lines: usize,
    pub tags: usize,
}

#[derive(Debug)]
struct TagBlock {
    tag: Tag,
    indent: String,
    indent_width: usize,
    line: usize,
    line_ending: String,
    /// Docstring terminator that ended the tag's text, emitted after the markup
    closing: Option<&'static str>,
}

#[derive(Debug)]
pub struct AnnotationRewriter {
    options: RewriteOptions,
}

impl AnnotationRewriter {
    pub fn new(options: RewriteOptions) -> Self {
        Self { options }
    }

    /// Stream `input` to `output`, replacing annotation tags with markup.
    ///
    /// # Errors
    ///
    /// Returns an [`AnnotationError`] when tags cannot be paired (see the variants), or when
    /// reading or writing fails. Output already written is left as is.
    pub fn rewrite<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<RewriteStats, AnnotationError> {
        let mut stats = RewriteStats::default();
        let mut run: Vec<TagBlock> = Vec::new();
        let mut buf = String::new();

        loop {
            buf.clear();
            if input.read_line(&mut buf)? == 0 {
                break;
            }
            stats.lines += 1;
            let (content, line_ending) = split_line_ending(&buf);

            match classify_line(content, self.options.delimiter) {
                LineKind::Tag(tag_line) => {
                    stats.tags += 1;
                    run.push(TagBlock {
                        indent_width: tag_line.indent.chars().count(),
                        indent: tag_line.indent,
                        tag: tag_line.tag,
                        line: stats.lines,
                        line_ending: line_ending.to_string(),
                        closing: None,
                    });
                    continue;
                }
                LineKind::Plain => {
                    if let Some(open) = run.last_mut()
                        && is_continuation(content, open.indent_width)
                    {
                        open.tag.extend(content.trim());
                        open.line_ending = line_ending.to_string();
                        continue;
                    }
                }
                LineKind::Malformed(kind) => {
                    log::warn!("Line {}: malformed {kind:?} tag left unchanged", stats.lines);
                }
            }

            self.flush_run(&mut run, &mut output)?;
            output.write_all(buf.as_bytes())?;
        }

        self.flush_run(&mut run, &mut output)?;
        output.flush()?;
        Ok(stats)
    }

    /// Convenience wrapper over [`Self::rewrite`] for in-memory text.
    ///
    /// # Errors
    ///
    /// See [`Self::rewrite`].
    pub fn rewrite_str(&self, input: &str) -> Result<String, AnnotationError> {
        let mut out = Vec::with_capacity(input.len());
        self.rewrite(input.as_bytes(), &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    fn flush_run<W: Write>(&self, run: &mut Vec<TagBlock>, output: &mut W) -> Result<(), AnnotationError> {
        if run.is_empty() {
            return Ok(());
        }
        let mut blocks = std::mem::take(run);
        for block in &mut blocks {
            block.closing = block.tag.take_closing_quotes();
        }
        for line in resolve_run(&blocks, self.options.force_type_spec)? {
            output.write_all(line.as_bytes())?;
        }
        Ok(())
    }
}

/// Pair the tags of one run and render them in order of appearance.
fn resolve_run(blocks: &[TagBlock], force_type_spec: bool) -> Result<Vec<String>, AnnotationError> {
    let n = blocks.len();
    let mut consumed = vec![false; n];
    let mut partner: Vec<Option<usize>> = vec![None; n];

    // param <-> type, by name
    for i in 0..n {
        let Tag::Param { name, .. } = &blocks[i].tag else {
            continue;
        };
        let found = (0..n).find(|&j| {
            !consumed[j] && matches!(&blocks[j].tag, Tag::Type { name: type_for, .. } if type_for == name)
        });
        if let Some(j) = found {
            consumed[j] = true;
            partner[i] = Some(j);
        }
    }

    for j in 0..n {
        let Tag::Type { name, .. } = &blocks[j].tag else {
            continue;
        };
        if consumed[j] {
            continue;
        }
        let unpaired_param = (0..n).find_map(|i| match &blocks[i].tag {
            Tag::Param {
                name, type_name: None, ..
            } if partner[i].is_none() => Some(name),
            _ => None,
        });
        return Err(match unpaired_param {
            Some(param) => AnnotationError::ParamTypeMismatch {
                param: param.clone(),
                type_name: name.clone(),
                line: blocks[j].line,
            },
            None => AnnotationError::TypeWithoutParam {
                name: name.clone(),
                line: blocks[j].line,
            },
        });
    }

    // return <-> rtype, in sequence
    let mut rtypes = (0..n).filter(|&j| matches!(blocks[j].tag, Tag::ReturnType { .. }));
    for i in 0..n {
        if matches!(blocks[i].tag, Tag::Return { .. })
            && let Some(j) = rtypes.next()
        {
            consumed[j] = true;
            partner[i] = Some(j);
        }
    }

    if force_type_spec {
        for (i, block) in blocks.iter().enumerate() {
            let missing = match &block.tag {
                Tag::Param {
                    name, type_name: None, ..
                } if partner[i].is_none() => Some(name.as_str()),
                Tag::Return { .. } if partner[i].is_none() => Some("return"),
                _ => None,
            };
            if let Some(name) = missing {
                return Err(AnnotationError::MissingTypeSpec {
                    name: name.to_string(),
                    line: block.line,
                });
            }
        }
    }

    let mut lines = Vec::with_capacity(n);
    for (i, block) in blocks.iter().enumerate() {
        if consumed[i] {
            continue;
        }
        let html = match &block.tag {
            Tag::Param { name, type_name, text } => {
                let type_name = type_name.as_deref().or(partner_type(blocks, &partner, i));
                markup::param(name, type_name, text)
            }
            Tag::Return { text } => markup::returns(partner_type(blocks, &partner, i), text),
            Tag::ReturnType { type_name } => markup::return_type(type_name),
            Tag::Raises { text } => markup::raises(text),
            Tag::Type { .. } => continue,
        };
        // A paired tag ends where its partner ends when the partner comes later.
        let line_ending = match partner[i] {
            Some(j) if j > i => &blocks[j].line_ending,
            _ => &block.line_ending,
        };
        let closing: String = std::iter::once(i)
            .chain(partner[i])
            .filter_map(|k| blocks[k].closing)
            .collect();
        lines.push(format!("{}{html}{closing}{line_ending}", block.indent));
    }
    Ok(lines)
}

fn partner_type<'a>(blocks: &'a [TagBlock], partner: &[Option<usize>], i: usize) -> Option<&'a str> {
    partner[i].and_then(|j| match &blocks[j].tag {
        Tag::Type { type_name, .. } | Tag::ReturnType { type_name } => Some(type_name.as_str()),
        _ => None,
    })
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}

fn is_continuation(content: &str, tag_indent_width: usize) -> bool {
    if content.trim().is_empty() {
        return false;
    }
    let indent_width = content.chars().take_while(|c| *c == ' ' || *c == '\t').count();
    indent_width > tag_indent_width
}
