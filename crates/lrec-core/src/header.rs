// Dweve LREC - Heterogeneous CSV Record Streaming
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Header storage: the header arena and the schema-keyed header cache.
//!
//! Records produced against a header keep borrowing its field names for as
//! long as the caller holds them, even after the stream has moved on to a
//! different header. Instead of counting references per header, every header
//! is allocated once in a [`HeaderArena`] and lives until the arena itself is
//! torn down. The [`HeaderCache`] indexes those headers by schema so that a
//! schema seen twice resolves to the same [`HeaderKeeper`].
//!
//! ```rust
//! use lrec_core::{HeaderArena, HeaderCache};
//!
//! let arena = HeaderArena::new();
//! let mut cache = HeaderCache::new(&arena);
//!
//! let first = cache.resolve("a,b,c", &["a", "b", "c"]);
//! let other = cache.resolve("d,e", &["d", "e"]);
//! let again = cache.resolve("a,b,c", &["a", "b", "c"]);
//!
//! assert!(std::ptr::eq(first, again));
//! assert!(!std::ptr::eq(first, other));
//! assert_eq!(cache.len(), 2);
//! ```

use bumpalo::Bump;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// A retained header line and its field names.
///
/// Field names may repeat; records match them by position, never by name.
/// Everything a keeper refers to lives in the arena it was allocated in.
pub struct HeaderKeeper<'a> {
    line: &'a str,
    fields: &'a [&'a str],
    ordinal: usize,
}

impl<'a> HeaderKeeper<'a> {
    /// The header line as it was read.
    #[inline]
    pub fn line(&self) -> &'a str {
        self.line
    }

    /// Field names in header order.
    #[inline]
    pub fn fields(&self) -> &'a [&'a str] {
        self.fields
    }

    /// Field name at `index`.
    #[inline]
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// Number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the header has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of this header in its cache, in first-seen order.
    #[inline]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Position of the first field called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| *field == name)
    }
}

impl fmt::Debug for HeaderKeeper<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderKeeper")
            .field("ordinal", &self.ordinal)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Arena that owns every header of one reader.
///
/// Header lines, field names and the [`HeaderKeeper`] structs themselves are
/// all bump-allocated. None of them need `Drop`, so releasing the arena frees
/// every header at once. The borrow checker guarantees no cache, reader or
/// record that borrows from the arena is still alive at that point.
pub struct HeaderArena {
    bump: Bump,
}

impl HeaderArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create an arena with `capacity` bytes reserved up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Bytes currently allocated in the arena.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Release every header allocated in this arena.
    ///
    /// Equivalent to dropping the arena; it exists so teardown can be spelled
    /// out at the end of a reader's life.
    pub fn teardown(self) {
        debug!(
            allocated_bytes = self.bump.allocated_bytes(),
            "Releasing header arena"
        );
        drop(self);
    }
}

impl Default for HeaderArena {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HeaderArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderArena")
            .field("allocated_bytes", &self.bump.allocated_bytes())
            .finish()
    }
}

/// Insertion-ordered cache from field-name sequence to [`HeaderKeeper`].
///
/// Two sequences are the same schema when they have the same length and the
/// same names in the same order. Each schema gets exactly one keeper, which is
/// never replaced or removed while the arena is alive.
pub struct HeaderCache<'a> {
    arena: &'a Bump,
    index: HashMap<&'a [&'a str], usize>,
    keepers: Vec<&'a HeaderKeeper<'a>>,
}

impl<'a> HeaderCache<'a> {
    /// Create an empty cache that allocates into `arena`.
    pub fn new(arena: &'a HeaderArena) -> Self {
        Self {
            arena: &arena.bump,
            index: HashMap::new(),
            keepers: Vec::new(),
        }
    }

    /// Return the canonical header for `fields`, creating it if needed.
    ///
    /// `line` is the raw header line the fields were split from. When the
    /// schema is already cached, neither `line` nor `fields` is retained.
    pub fn resolve(&mut self, line: &str, fields: &[&str]) -> &'a HeaderKeeper<'a> {
        if let Some(keeper) = self.get(fields) {
            trace!(ordinal = keeper.ordinal, "Reusing cached header");
            return keeper;
        }

        let arena = self.arena;
        let line: &'a str = arena.alloc_str(line);
        let names: Vec<&'a str> = fields
            .iter()
            .map(move |name| &*arena.alloc_str(name))
            .collect();
        let fields: &'a [&'a str] = arena.alloc_slice_copy(&names);

        let ordinal = self.keepers.len();
        let keeper: &'a HeaderKeeper<'a> = arena.alloc(HeaderKeeper {
            line,
            fields,
            ordinal,
        });

        self.index.insert(fields, ordinal);
        self.keepers.push(keeper);
        debug!(ordinal, fields = keeper.len(), "Cached new header schema");

        keeper
    }

    /// Look up the header for `fields` without inserting.
    pub fn get(&self, fields: &[&str]) -> Option<&'a HeaderKeeper<'a>> {
        lookup(&self.index, fields).map(|ordinal| self.keepers[ordinal])
    }

    /// Whether `fields` already has a header.
    pub fn contains(&self, fields: &[&str]) -> bool {
        lookup(&self.index, fields).is_some()
    }

    /// Number of distinct schemas.
    #[inline]
    pub fn len(&self) -> usize {
        self.keepers.len()
    }

    /// Whether no header has been cached yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keepers.is_empty()
    }

    /// Headers in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &'a HeaderKeeper<'a>> + '_ {
        self.keepers.iter().copied()
    }

    /// Bytes allocated in the backing arena.
    pub fn allocated_bytes(&self) -> usize {
        self.arena.allocated_bytes()
    }
}

impl fmt::Debug for HeaderCache<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keepers.iter()).finish()
    }
}

// Both maps and probes shrink to a common lifetime here, so a probe borrowed
// from a short-lived line can be looked up in the arena-keyed index.
fn lookup<'m>(index: &'m HashMap<&'m [&'m str], usize>, fields: &'m [&'m str]) -> Option<usize> {
    index.get(fields).copied()
}
