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

//! Records: header field names zipped with the values of one data line.

use crate::header::HeaderKeeper;
use std::fmt;
use std::ops::Range;

/// One data line, positionally paired with its header's field names.
///
/// The record owns its data line; values are byte ranges into it. Keys are
/// borrowed from the [`HeaderKeeper`], which lives in the header arena, so a
/// record may be kept for as long as that arena is alive, independently of
/// the reader that produced it.
///
/// Because matching is positional, a header may name the same field twice.
/// [`get`](Self::get) returns the first match; [`iter`](Self::iter) yields
/// every pair in header order.
///
/// # Examples
///
/// ```rust
/// use lrec_core::{parse_data_line, HeaderArena, HeaderCache};
///
/// let arena = HeaderArena::new();
/// let mut cache = HeaderCache::new(&arena);
/// let header = cache.resolve("host,port", &["host", "port"]);
///
/// let record = parse_data_line(header, "localhost,8080".to_string(), b',', false).unwrap();
/// assert_eq!(record.get("port"), Some("8080"));
///
/// let pairs: Vec<_> = record.iter().collect();
/// assert_eq!(pairs, vec![("host", "localhost"), ("port", "8080")]);
/// ```
#[derive(Clone)]
pub struct Record<'a> {
    header: &'a HeaderKeeper<'a>,
    line: String,
    spans: Vec<Range<usize>>,
}

impl<'a> Record<'a> {
    pub(crate) fn new(header: &'a HeaderKeeper<'a>, line: String, spans: Vec<Range<usize>>) -> Self {
        debug_assert_eq!(header.len(), spans.len());
        Self {
            header,
            line,
            spans,
        }
    }

    /// The header this record was parsed against.
    #[inline]
    pub fn header(&self) -> &'a HeaderKeeper<'a> {
        self.header
    }

    /// The data line the values are sliced from.
    #[inline]
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether the record has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Value of the first field called `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.header.position(key).map(|index| self.value(index))
    }

    /// Key and value at `index`.
    pub fn get_index(&self, index: usize) -> Option<(&'a str, &str)> {
        let key = self.header.field(index)?;
        self.spans.get(index)?;
        Some((key, self.value(index)))
    }

    /// Field names in header order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.header.fields().iter().copied()
    }

    /// Values in header order.
    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans.iter().map(move |span| &self.line[span.clone()])
    }

    /// `(key, value)` pairs in header order.
    pub fn iter(&self) -> Iter<'_, 'a> {
        Iter {
            keys: self.header.fields().iter(),
            spans: self.spans.iter(),
            line: &self.line,
        }
    }

    /// Copy the pairs out, detaching the result from the header arena.
    pub fn to_owned_pairs(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    /// Give back the data line.
    pub fn into_line(self) -> String {
        self.line
    }

    #[inline]
    fn value(&self, index: usize) -> &str {
        &self.line[self.spans[index].clone()]
    }
}

impl PartialEq for Record<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for Record<'_> {}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders the record as `key=value` pairs joined by commas.
impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// Iterator over the `(key, value)` pairs of a [`Record`].
pub struct Iter<'r, 'a> {
    keys: std::slice::Iter<'a, &'a str>,
    spans: std::slice::Iter<'r, Range<usize>>,
    line: &'r str,
}

impl<'r, 'a> Iterator for Iter<'r, 'a> {
    type Item = (&'a str, &'r str);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        let span = self.spans.next()?;
        Some((*key, &self.line[span.clone()]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.spans.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_, '_> {}

impl<'r, 'a> IntoIterator for &'r Record<'a> {
    type Item = (&'a str, &'r str);
    type IntoIter = Iter<'r, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Record<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_data_line, HeaderArena, HeaderCache};

    #[test]
    fn test_accessors() {
        let arena = HeaderArena::new();
        let mut cache = HeaderCache::new(&arena);
        let header = cache.resolve("a,b,c", &["a", "b", "c"]);

        let record = parse_data_line(header, "1,2,3".to_string(), b',', false).unwrap();
        assert_eq!(record.len(), 3);
        assert!(!record.is_empty());
        assert_eq!(record.line(), "1,2,3");
        assert_eq!(record.get("b"), Some("2"));
        assert_eq!(record.get("z"), None);
        assert_eq!(record.get_index(2), Some(("c", "3")));
        assert_eq!(record.get_index(3), None);
        assert!(std::ptr::eq(record.header(), header));
    }

    #[test]
    fn test_keys_and_values() {
        let arena = HeaderArena::new();
        let mut cache = HeaderCache::new(&arena);
        let header = cache.resolve("x y", &["x", "y"]);

        let record = parse_data_line(header, "10   20".to_string(), b' ', true).unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(record.values().collect::<Vec<_>>(), vec!["10", "20"]);
    }

    #[test]
    fn test_duplicate_keys_first_wins_on_get() {
        let arena = HeaderArena::new();
        let mut cache = HeaderCache::new(&arena);
        let header = cache.resolve("a,a", &["a", "a"]);

        let record = parse_data_line(header, "1,2".to_string(), b',', false).unwrap();
        assert_eq!(record.get("a"), Some("1"));
        assert_eq!(
            record.to_owned_pairs(),
            vec![
                ("a".to_string(), "1".to_string()),
                ("a".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_display_and_debug() {
        let arena = HeaderArena::new();
        let mut cache = HeaderCache::new(&arena);
        let header = cache.resolve("a,b", &["a", "b"]);

        let record = parse_data_line(header, "1,".to_string(), b',', false).unwrap();
        assert_eq!(record.to_string(), "a=1,b=");
        assert_eq!(format!("{:?}", record), r#"{"a": "1", "b": ""}"#);
    }

    #[test]
    fn test_equality_ignores_header_identity() {
        let arena = HeaderArena::new();
        let mut cache = HeaderCache::new(&arena);
        let header = cache.resolve("a", &["a"]);

        let left = parse_data_line(header, "1".to_string(), b',', false).unwrap();
        let right = left.clone();
        let other = parse_data_line(header, "2".to_string(), b',', false).unwrap();
        assert_eq!(left, right);
        assert_ne!(left, other);
    }

    #[test]
    fn test_into_line() {
        let arena = HeaderArena::new();
        let mut cache = HeaderCache::new(&arena);
        let header = cache.resolve("a,b", &["a", "b"]);

        let record = parse_data_line(header, "p,q".to_string(), b',', false).unwrap();
        let iter = record.iter();
        assert_eq!(iter.len(), 2);
        assert_eq!(record.into_line(), "p,q");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_preserves_header_order() {
        let arena = HeaderArena::new();
        let mut cache = HeaderCache::new(&arena);
        let header = cache.resolve("z,a,m", &["z", "a", "m"]);

        let record = parse_data_line(header, "1,2,3".to_string(), b',', false).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"z":"1","a":"2","m":"3"}"#);
    }
}
