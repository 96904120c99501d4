//! Markdown helpers for the docs site: title stripping, heading anchors,
//! table-of-contents extraction and HTML rendering.
//!
//! Anchors are produced by one [`HeadingSlugger`] walk in both the TOC and the
//! renderer, so every TOC link resolves to a rendered heading.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;

use crate::domain::models::content::TocEntry;

pub const TOC_LIMIT: usize = 25;

static LEADING_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\s+.+\n+").expect("title pattern"));

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

/// Drops a leading `# Title` line; pages render the title themselves.
pub fn strip_title(content: &str) -> &str {
    match LEADING_TITLE.find(content) {
        Some(m) => &content[m.end()..],
        None => content,
    }
}

/// The first `# ` heading anywhere in the document, cleaned of emoji.
pub fn first_title(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(clean_heading)
        .filter(|t| !t.is_empty())
}

fn is_pictograph(c: char) -> bool {
    matches!(
        c as u32,
        0x1F000..=0x1FAFF | 0x2300..=0x23FF | 0x2600..=0x27BF | 0x2B00..=0x2BFF | 0xFE00..=0xFE0F | 0x200D
    )
}

/// Removes emoji decorations and collapses whitespace.
pub fn clean_heading(text: &str) -> String {
    text.chars()
        .filter(|c| !is_pictograph(*c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lower-case ASCII anchor: runs of anything else become a single `-`.
pub fn heading_id(text: &str) -> String {
    let mut id = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !id.is_empty() {
                id.push('-');
            }
            pending_dash = false;
            id.push(c);
        } else {
            pending_dash = true;
        }
    }
    id
}

/// Hands out unique anchors in document order (`setup`, `setup-1`, ...).
#[derive(Default)]
pub struct HeadingSlugger {
    seen: HashMap<String, usize>,
}

impl HeadingSlugger {
    pub fn slug(&mut self, text: &str) -> String {
        let mut base = heading_id(&clean_heading(text));
        if base.is_empty() {
            base = "section".to_string();
        }
        let count = self.seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 { base } else { format!("{}-{}", base, count) };
        *count += 1;
        slug
    }
}

struct Heading {
    level: HeadingLevel,
    text: String,
}

fn headings(events: &[Event<'_>]) -> Vec<Heading> {
    let mut found = Vec::new();
    let mut current: Option<Heading> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some(Heading { level: *level, text: String::new() });
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = current.as_mut() {
                    heading.text.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = current.take() {
                    found.push(heading);
                }
            }
            _ => {}
        }
    }

    found
}

/// Level-2 and level-3 headings, in order, capped at `limit`.
/// Headings inside code blocks are not headings and never show up.
pub fn extract_toc(markdown: &str, limit: usize) -> Vec<TocEntry> {
    let events: Vec<Event> = Parser::new_ext(markdown, options()).collect();
    let mut slugger = HeadingSlugger::default();

    headings(&events)
        .into_iter()
        .map(|h| {
            let id = slugger.slug(&h.text);
            (h, id)
        })
        .filter(|(h, _)| matches!(h.level, HeadingLevel::H2 | HeadingLevel::H3))
        .take(limit)
        .map(|(h, id)| TocEntry { level: h.level as u8, text: clean_heading(&h.text), id })
        .collect()
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders markdown to HTML with heading anchors; external links open in a new tab.
pub fn render_html(markdown: &str) -> String {
    let events: Vec<Event> = Parser::new_ext(markdown, options()).collect();

    let mut slugger = HeadingSlugger::default();
    let mut ids = headings(&events)
        .into_iter()
        .map(|h| slugger.slug(&h.text))
        .collect::<Vec<_>>()
        .into_iter();

    let events = events.into_iter().map(|event| match event {
        Event::Start(Tag::Heading { level, id, classes, attrs }) => {
            let id = id.or_else(|| ids.next().map(CowStr::from));
            Event::Start(Tag::Heading { level, id, classes, attrs })
        }
        Event::Start(Tag::Link { dest_url, title, .. })
            if dest_url.starts_with("http://") || dest_url.starts_with("https://") =>
        {
            let title = if title.is_empty() {
                String::new()
            } else {
                format!(r#" title="{}""#, escape_attr(&title))
            };
            Event::InlineHtml(CowStr::from(format!(
                r#"<a href="{}"{} target="_blank" rel="noopener noreferrer">"#,
                escape_attr(&dest_url),
                title
            )))
        }
        other => other,
    });

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, events);
    output
}
