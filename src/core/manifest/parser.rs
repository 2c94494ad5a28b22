// ─── Pack list parser ───
//
//   # comment
//   [paper]                 <- loader section, or [datapack]
//   ---dir:economy          <- subdirectory until the next section or marker
//   EssentialsX             <- query: slug, project id, or free text
//
// Every raw line is kept so the cache can be written back in the same order.

use crate::core::loaders::LoaderRequirement;

pub const DIR_MARKER: &str = "---dir:";

/// Syntactic classification of one line, without context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineSyntax {
    Blank,
    Comment,
    Section(LoaderRequirement),
    /// `None` for an empty marker, which resets to the section root.
    Directory(Option<String>),
    Query(String),
}

pub fn classify(line: &str) -> LineSyntax {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineSyntax::Blank;
    }
    if trimmed.starts_with('#') {
        return LineSyntax::Comment;
    }
    if let Some(identifier) = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return LineSyntax::Section(LoaderRequirement::from_header(identifier));
    }
    if let Some(dir) = trimmed.strip_prefix(DIR_MARKER) {
        let dir = dir.trim();
        return LineSyntax::Directory((!dir.is_empty()).then(|| dir.to_string()));
    }
    LineSyntax::Query(trimmed.to_string())
}

/// A query together with the section context it appeared in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackEntry {
    /// Index into [`PackList::lines`].
    pub line: usize,
    pub query: String,
    pub requirement: LoaderRequirement,
    pub subdir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Blank, comment, section header or directory marker.
    Passthrough,
    Entry(PackEntry),
    /// A query before any section header; there is no loader to resolve it for.
    Orphan(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackLine {
    /// Original text including its line terminator.
    pub raw: String,
    pub kind: LineKind,
}

/// A parsed pack list (or cache file, which uses the same format).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackList {
    lines: Vec<PackLine>,
}

impl PackList {
    pub fn parse(text: &str) -> Self {
        let mut section: Option<LoaderRequirement> = None;
        let mut subdir: Option<String> = None;
        let mut lines = Vec::new();

        for (index, raw) in text.split_inclusive('\n').enumerate() {
            let kind = match classify(raw) {
                LineSyntax::Blank | LineSyntax::Comment => LineKind::Passthrough,
                LineSyntax::Section(requirement) => {
                    section = Some(requirement);
                    subdir = None;
                    LineKind::Passthrough
                }
                LineSyntax::Directory(dir) => {
                    subdir = dir;
                    LineKind::Passthrough
                }
                LineSyntax::Query(query) => match &section {
                    Some(requirement) => LineKind::Entry(PackEntry {
                        line: index,
                        query,
                        requirement: requirement.clone(),
                        subdir: subdir.clone(),
                    }),
                    None => LineKind::Orphan(query),
                },
            };
            lines.push(PackLine {
                raw: raw.to_string(),
                kind,
            });
        }

        Self { lines }
    }

    pub fn lines(&self) -> &[PackLine] {
        &self.lines
    }

    pub fn entries(&self) -> impl Iterator<Item = &PackEntry> {
        self.lines.iter().filter_map(|line| match &line.kind {
            LineKind::Entry(entry) => Some(entry),
            _ => None,
        })
    }

    pub fn orphans(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match &line.kind {
            LineKind::Orphan(query) => Some(query.as_str()),
            _ => None,
        })
    }

    /// Render the list with some lines swapped for new content, keeping
    /// each replaced line's terminator (or adding `\n` on a final line
    /// that had none).
    pub fn render_with<F>(&self, mut replacement: F) -> String
    where
        F: FnMut(usize) -> Option<String>,
    {
        let mut out = String::new();
        for (index, line) in self.lines.iter().enumerate() {
            match replacement(index) {
                Some(content) => {
                    out.push_str(&content);
                    out.push_str(line_terminator(&line.raw));
                }
                None => out.push_str(&line.raw),
            }
        }
        out
    }
}

fn line_terminator(raw: &str) -> &str {
    if raw.ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}
