//! Object stream reader
//!
//! A single-pass, forward-only iterator over the records of a model file.
//! Lines are accumulated until the object terminator, then reduced to a
//! field list. Fused definitions (`a, b; c, d;` inside one object) become
//! several records sharing the keyword and zone context.

use std::collections::{HashSet, VecDeque};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::line::{
    content_ends_object, inline_zone_name, is_blank, is_comment_line, parse_keyword,
    strip_inline_comment, strip_keyword_prefix,
};
use super::stats::ReaderStats;
use super::zone_context::ZoneContext;
use crate::app::models::{CommentRecord, ObjectRecord, Record};
use crate::constants::{FIELD_SEPARATOR, OBJECT_TERMINATOR, SETTING_KEY_SEPARATOR, keywords};
use crate::{Error, Result};

/// Object whose terminator has not been seen yet
#[derive(Debug)]
struct PendingObject {
    keyword: String,
    lines: Vec<String>,
    /// `Zone` object whose name was not on the keyword line
    zone_pending: bool,
    start_line: usize,
}

/// Streaming reader producing [`Record`]s tagged with zone context
///
/// Not seekable: restart by opening the source again. The iterator is fused
/// after end of input or after yielding a [`Error::StreamRead`].
pub struct IdfReader<R: BufRead> {
    lines: io::Lines<R>,
    source: PathBuf,
    settings_keys: HashSet<String>,
    marker: char,
    zone_context: ZoneContext,
    pending: Option<PendingObject>,
    queued: VecDeque<Record>,
    line_number: usize,
    stats: ReaderStats,
    finished: bool,
}

impl IdfReader<BufReader<File>> {
    /// Open a model file
    ///
    /// Fails with [`Error::SourceNotFound`] before any record is produced when
    /// the path does not exist, is a directory, or cannot be opened.
    pub fn open(
        path: impl AsRef<Path>,
        settings_keys: HashSet<String>,
        marker: char,
    ) -> Result<Self> {
        let path = path.as_ref();

        if path.is_dir() {
            return Err(Error::source_not_found(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "path is a directory"),
            ));
        }

        let file = File::open(path).map_err(|e| Error::source_not_found(path, e))?;
        debug!("Opened model file: {}", path.display());

        Ok(Self::from_reader(
            BufReader::new(file),
            path,
            settings_keys,
            marker,
        ))
    }
}

impl<R: BufRead> IdfReader<R> {
    /// Read records from any buffered source; `source_name` is used in errors
    pub fn from_reader(
        reader: R,
        source_name: impl Into<PathBuf>,
        settings_keys: HashSet<String>,
        marker: char,
    ) -> Self {
        Self {
            lines: reader.lines(),
            source: source_name.into(),
            settings_keys,
            marker,
            zone_context: ZoneContext::new(),
            pending: None,
            queued: VecDeque::new(),
            line_number: 0,
            stats: ReaderStats::new(),
            finished: false,
        }
    }

    /// Statistics for the records read so far
    pub fn stats(&self) -> &ReaderStats {
        &self.stats
    }

    /// Path or name of the source being read
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Zone in effect at the current read position
    pub fn current_zone(&self) -> Option<&str> {
        self.zone_context.current()
    }

    fn handle_line(&mut self, line: String) {
        let trimmed = line.trim();

        if is_blank(trimmed) {
            return;
        }

        if is_comment_line(trimmed, self.marker) {
            match self.pending.as_mut() {
                Some(pending) => pending.lines.push(line),
                None => self.handle_top_level_comment(trimmed),
            }
            return;
        }

        if let Some(pending) = self.pending.as_mut() {
            let closes = content_ends_object(trimmed, self.marker);
            pending.lines.push(line);
            if closes {
                self.close_pending();
            }
            return;
        }

        let Some(keyword) = parse_keyword(trimmed, self.marker) else {
            self.stats.unrecognized_lines += 1;
            warn!(
                "Line {} in {} does not start an object, skipping",
                self.line_number,
                self.source.display()
            );
            return;
        };

        let mut zone_pending = false;
        if keyword.eq_ignore_ascii_case(keywords::ZONE) {
            match inline_zone_name(trimmed, self.marker) {
                Some(zone) => {
                    self.zone_context.enter(zone);
                    self.stats.zones += 1;
                }
                None => zone_pending = true,
            }
        }

        let closes = content_ends_object(trimmed, self.marker);
        self.pending = Some(PendingObject {
            keyword: keyword.to_string(),
            lines: vec![line],
            zone_pending,
            start_line: self.line_number,
        });

        if closes {
            self.close_pending();
        }
    }

    fn handle_top_level_comment(&mut self, trimmed: &str) {
        let text = trimmed[self.marker.len_utf8()..].trim();
        if text.is_empty() {
            return;
        }

        let setting = text
            .split_once(SETTING_KEY_SEPARATOR)
            .map(|(key, value)| (key.trim(), value))
            .filter(|(key, _)| self.settings_keys.contains(*key))
            .map(|(key, value)| {
                let value = strip_inline_comment(value.trim(), self.marker).trim();
                (key.to_string(), value.to_string())
            });

        let (parsed_key, parsed_value) = match setting {
            Some((key, value)) => {
                self.stats.settings_comments += 1;
                (Some(key), Some(value))
            }
            None => (None, None),
        };

        self.stats.comments += 1;
        self.queued.push_back(Record::Comment(CommentRecord {
            raw_text: text.to_string(),
            parsed_key,
            parsed_value,
            zone: self.zone_context.snapshot(),
        }));
    }

    fn close_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        let field_lists = split_fused(extract_fields(&pending.lines, self.marker));

        if pending.zone_pending {
            match field_lists.first().and_then(|fields| fields.first()) {
                Some(zone) => {
                    self.zone_context.enter(zone);
                    self.stats.zones += 1;
                }
                None => debug!(
                    "Zone object at line {} has no name; zone context unchanged",
                    pending.start_line
                ),
            }
        }

        if field_lists.is_empty() {
            self.stats.empty_objects += 1;
            debug!(
                "Object {} at line {} has no fields",
                pending.keyword, pending.start_line
            );
            self.push_object(&pending.keyword, Vec::new());
            return;
        }

        if field_lists.len() > 1 {
            self.stats.fused_objects += 1;
            debug!(
                "Object {} at line {} splits into {} records",
                pending.keyword,
                pending.start_line,
                field_lists.len()
            );
        }

        for fields in field_lists {
            self.push_object(&pending.keyword, fields);
        }
    }

    fn push_object(&mut self, keyword: &str, fields: Vec<String>) {
        self.stats.objects += 1;
        self.queued.push_back(Record::Object(ObjectRecord {
            keyword: keyword.to_string(),
            fields,
            zone: self.zone_context.snapshot(),
        }));
    }

    fn finish(&mut self) {
        self.finished = true;
        if let Some(pending) = self.pending.take() {
            self.stats.unterminated_at_eof = true;
            warn!(
                "Object {} opened at line {} in {} has no terminator; discarded",
                pending.keyword,
                pending.start_line,
                self.source.display()
            );
        }
        debug!(
            "Finished reading {}: {}",
            self.source.display(),
            self.stats.summary()
        );
    }
}

impl<R: BufRead> Iterator for IdfReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.queued.pop_front() {
                return Some(Ok(record));
            }

            if self.finished {
                return None;
            }

            match self.lines.next() {
                Some(Ok(line)) => {
                    self.line_number += 1;
                    self.stats.lines_read += 1;
                    self.handle_line(line);
                }
                Some(Err(e)) => {
                    self.finished = true;
                    if let Some(pending) = self.pending.take() {
                        debug!(
                            "Dropping partial object {} from line {}",
                            pending.keyword, pending.start_line
                        );
                    }
                    warn!(
                        "Read failure in {} after line {}: {}",
                        self.source.display(),
                        self.line_number,
                        e
                    );
                    return Some(Err(Error::stream_read(
                        &self.source,
                        self.line_number + 1,
                        e,
                    )));
                }
                None => self.finish(),
            }
        }
    }
}

impl<R: BufRead> FusedIterator for IdfReader<R> {}

/// Reduce the accumulated lines of one object to its trimmed, non-empty fields
fn extract_fields(lines: &[String], marker: char) -> Vec<String> {
    let mut pieces: Vec<&str> = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if is_comment_line(trimmed, marker) {
            continue;
        }

        let mut content = strip_inline_comment(trimmed, marker).trim();
        if index == 0 {
            content = strip_keyword_prefix(content);
        }

        if !content.is_empty() {
            pieces.push(content);
        }
    }

    if let Some(last) = pieces.pop() {
        pieces.push(last.trim_end().trim_end_matches(OBJECT_TERMINATOR));
    }

    pieces
        .join(" ")
        .split(FIELD_SEPARATOR)
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a field list at every embedded terminator
///
/// Empty groups are dropped, so `a, b;` followed by nothing yields one list.
fn split_fused(fields: Vec<String>) -> Vec<Vec<String>> {
    if !fields.iter().any(|field| field.contains(OBJECT_TERMINATOR)) {
        return if fields.is_empty() {
            Vec::new()
        } else {
            vec![fields]
        };
    }

    let mut groups: Vec<Vec<String>> = vec![Vec::new()];
    for field in fields {
        for (part_index, part) in field.split(OBJECT_TERMINATOR).enumerate() {
            if part_index > 0 {
                groups.push(Vec::new());
            }
            let part = part.trim();
            if !part.is_empty() {
                if let Some(group) = groups.last_mut() {
                    group.push(part.to_string());
                }
            }
        }
    }

    groups.retain(|group| !group.is_empty());
    groups
}
