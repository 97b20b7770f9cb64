//! Image File Directory traversal.
//!
//! The walker reads every entry of a directory in file order, decodes it,
//! and records the result under the label table of the directory's kind.
//! Exif and GPS pointer entries in IFD0 fan out into their sub-IFDs once
//! IFD0 is complete, so sub-IFD tags always follow IFD0's tags. Pointer tags
//! inside a sub-IFD are recorded but not followed, which keeps the recursion
//! two levels deep.
//!
//! Offsets come straight from the file, so a crafted file can point a
//! sub-IFD back at a directory that was already read. Every directory offset
//! is recorded in a visited set before its entries are processed; revisits
//! are dropped, which bounds the work regardless of how pointers are wired.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::config::ParseOptions;
use crate::io::ByteReader;
use crate::metadata::{normalize_value, TagMap};

use super::parser::{IfdEntry, TiffHeader, IFD_COUNT_SIZE, IFD_ENTRY_SIZE};
use super::tags::IfdKind;
use super::values::{decode_entry, DecodedValue};

/// Walks the directories of one Exif container into a [`TagMap`].
///
/// A walker lives for exactly one decode; its visited set and output are
/// never shared between calls.
pub struct IfdWalker<'a> {
    reader: &'a ByteReader,
    header: TiffHeader,
    options: &'a ParseOptions,
    visited: HashSet<u32>,
    output: TagMap,
}

impl<'a> IfdWalker<'a> {
    /// Create a walker over the container described by `header`.
    pub fn new(reader: &'a ByteReader, header: TiffHeader, options: &'a ParseOptions) -> Self {
        Self {
            reader,
            header,
            options,
            visited: HashSet::new(),
            output: TagMap::new(),
        }
    }

    /// Walk the directory at `ifd_offset` (relative to the TIFF header),
    /// labelling its entries with the table for `kind`.
    ///
    /// Offset 0, already-visited offsets, and offsets with fewer than two
    /// bytes left in the buffer are ignored.
    pub fn walk(&mut self, ifd_offset: u32, kind: IfdKind) {
        if ifd_offset == 0 {
            return;
        }

        if self.visited.contains(&ifd_offset) {
            debug!(
                offset = ifd_offset,
                kind = kind.name(),
                "directory already visited, not following pointer"
            );
            return;
        }

        let Some(start) = self.header.absolute(ifd_offset) else {
            return;
        };
        if self.reader.remaining(start) < IFD_COUNT_SIZE {
            debug!(
                offset = ifd_offset,
                kind = kind.name(),
                "directory offset outside the buffer"
            );
            return;
        }

        self.visited.insert(ifd_offset);

        let order = self.header.byte_order;
        let Some(entry_count) = self.reader.read_u16(start, order) else {
            return;
        };

        debug!(
            offset = ifd_offset,
            kind = kind.name(),
            entries = entry_count,
            "walking directory"
        );

        let mut sub_ifds = Vec::new();

        for index in 0..entry_count as usize {
            let entry_offset = start + IFD_COUNT_SIZE + index * IFD_ENTRY_SIZE;
            let Some(entry) = IfdEntry::read(self.reader, entry_offset, order) else {
                trace!(
                    offset = ifd_offset,
                    index,
                    "directory truncated, remaining entries ignored"
                );
                break;
            };

            let value = decode_entry(self.reader, &self.header, &entry);
            if value.is_none() {
                continue;
            }

            if let Some(target) = kind.pointer_target(entry.tag) {
                match value.as_integer().and_then(|v| u32::try_from(v).ok()) {
                    Some(offset) => sub_ifds.push((offset, target)),
                    None => trace!(tag = entry.tag, "pointer entry without a usable offset"),
                }
            }

            self.record(kind, entry.tag, &value);
        }

        for (offset, target) in sub_ifds {
            self.walk(offset, target);
        }
    }

    /// Consume the walker, returning everything it collected.
    pub fn into_tags(self) -> TagMap {
        self.output
    }

    fn record(&mut self, kind: IfdKind, tag: u16, value: &DecodedValue) {
        let text = normalize_value(value, self.options.decimal_places);
        if text.is_empty() && !self.options.keep_empty_values {
            trace!(tag, kind = kind.name(), "dropping empty value");
            return;
        }
        self.output.insert(kind.resolve(tag), text);
    }
}

// =============================================================================
// Tests
// =============================================================================
