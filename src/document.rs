//! A BSON document represented as an ordered list of fields.

use std::{
    fmt::{self, Debug, Display, Formatter},
    iter::{Extend, FromIterator, IntoIterator},
};

use crate::{
    Binary,
    bson::{Array, Bson, Regex, Timestamp},
    error::{Error, Result},
    extjson::{self, JsonStringFormat},
    oid::ObjectId,
    spec::ElementType,
    uuid::UuidEncoding,
};

/// A BSON document represented as an ordered list of fields.
///
/// Field order is insertion order. Unlike a map, a document may hold the same key more than
/// once: the parser keeps every field it reads, so `{ "a" : 1, "a" : 2 }` survives a round
/// trip unchanged. Lookups by key see the first matching field.
#[derive(Clone, PartialEq, Default)]
pub struct Document {
    inner: Vec<(String, Bson)>,
}

/// Renders the document as compact TenGen extended JSON with the default UUID encoding.
impl Display for Document {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.write_str(&extjson::to_json_string(
            self,
            JsonStringFormat::TenGen,
            0,
            UuidEncoding::Default,
        ))
    }
}

impl Debug for Document {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "Document(")?;
        fmt.debug_map()
            .entries(self.inner.iter().map(|(k, v)| (k, v)))
            .finish()?;
        write!(fmt, ")")
    }
}

/// An owning iterator over Document entries.
pub struct IntoIter {
    inner: std::vec::IntoIter<(String, Bson)>,
}

/// An iterator over Document entries.
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (String, Bson)>,
}

/// An iterator over a [`Document`]'s keys and mutable values.
pub struct IterMut<'a> {
    inner: std::slice::IterMut<'a, (String, Bson)>,
}

/// An iterator over a Document's keys.
pub struct Keys<'a> {
    inner: std::slice::Iter<'a, (String, Bson)>,
}

/// An iterator over a Document's values.
pub struct Values<'a> {
    inner: std::slice::Iter<'a, (String, Bson)>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a String;

    fn next(&mut self) -> Option<&'a String> {
        self.inner.next().map(|(k, _)| k)
    }
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a Bson;

    fn next(&mut self) -> Option<&'a Bson> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl IntoIterator for Document {
    type Item = (String, Bson);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.inner.into_iter(),
        }
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Bson);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.inner.iter(),
        }
    }
}

/// Collects every pair in order, keeping duplicate keys.
impl FromIterator<(String, Bson)> for Document {
    fn from_iter<T: IntoIterator<Item = (String, Bson)>>(iter: T) -> Self {
        Document {
            inner: iter.into_iter().collect(),
        }
    }
}

impl Iterator for IntoIter {
    type Item = (String, Bson);

    fn next(&mut self) -> Option<(String, Bson)> {
        self.inner.next()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a String, &'a Bson);

    fn next(&mut self) -> Option<(&'a String, &'a Bson)> {
        self.inner.next().map(|(k, v)| (k, v))
    }
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (&'a String, &'a mut Bson);

    fn next(&mut self) -> Option<(&'a String, &'a mut Bson)> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }
}

impl Document {
    /// Creates a new empty Document.
    pub fn new() -> Document {
        Document { inner: Vec::new() }
    }

    /// Gets an iterator over the entries of the document, in order.
    pub fn iter(&self) -> Iter<'_> {
        self.into_iter()
    }

    /// Gets an iterator over pairs of keys and mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            inner: self.inner.iter_mut(),
        }
    }

    /// Clears the document, removing all values.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Returns a reference to the Bson of the first field named `key`.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&Bson> {
        let key = key.as_ref();
        self.inner.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Gets a mutable reference to the Bson of the first field named `key`.
    pub fn get_mut(&mut self, key: impl AsRef<str>) -> Option<&mut Bson> {
        let key = key.as_ref();
        self.inner
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns every value stored under `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Bson> + 'a {
        self.inner
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v)
    }

    fn get_typed<'a, T>(
        &'a self,
        key: impl AsRef<str>,
        expected: ElementType,
        extract: impl FnOnce(&'a Bson) -> Option<T>,
    ) -> Result<T> {
        let key = key.as_ref();
        let value = self.get(key).ok_or_else(|| {
            Error::value_access_not_present().with_message(format!("key {key:?}"))
        })?;
        extract(value).ok_or_else(|| {
            Error::value_access_unexpected_type(value.element_type(), expected)
                .with_message(format!("key {key:?}"))
        })
    }

    /// Get a floating point value for this key if it exists and has
    /// the correct type.
    pub fn get_f64(&self, key: impl AsRef<str>) -> Result<f64> {
        self.get_typed(key, ElementType::Double, Bson::as_f64)
    }

    /// Get a string slice this key if it exists and has the correct type.
    pub fn get_str(&self, key: impl AsRef<str>) -> Result<&str> {
        self.get_typed(key, ElementType::String, Bson::as_str)
    }

    /// Get a reference to an array for this key if it exists and has
    /// the correct type.
    pub fn get_array(&self, key: impl AsRef<str>) -> Result<&Array> {
        self.get_typed(key, ElementType::Array, Bson::as_array)
    }

    /// Get a reference to a document for this key if it exists and has
    /// the correct type.
    pub fn get_document(&self, key: impl AsRef<str>) -> Result<&Document> {
        self.get_typed(key, ElementType::EmbeddedDocument, Bson::as_document)
    }

    /// Get a bool value for this key if it exists and has the correct type.
    pub fn get_bool(&self, key: impl AsRef<str>) -> Result<bool> {
        self.get_typed(key, ElementType::Boolean, Bson::as_bool)
    }

    /// Returns wether this key has a null value
    pub fn is_null(&self, key: impl AsRef<str>) -> bool {
        self.get(key) == Some(&Bson::Null)
    }

    /// Get an i32 value for this key if it exists and has the correct type.
    pub fn get_i32(&self, key: impl AsRef<str>) -> Result<i32> {
        self.get_typed(key, ElementType::Int32, Bson::as_i32)
    }

    /// Get an i64 value for this key if it exists and has the correct type.
    pub fn get_i64(&self, key: impl AsRef<str>) -> Result<i64> {
        self.get_typed(key, ElementType::Int64, Bson::as_i64)
    }

    /// Get a time stamp value for this key if it exists and has the correct type.
    pub fn get_timestamp(&self, key: impl AsRef<str>) -> Result<Timestamp> {
        self.get_typed(key, ElementType::Timestamp, Bson::as_timestamp)
    }

    /// Get a reference to a binary value for this key if it exists and has the correct type.
    pub fn get_binary(&self, key: impl AsRef<str>) -> Result<&Binary> {
        self.get_typed(key, ElementType::Binary, Bson::as_binary)
    }

    /// Get an object id value for this key if it exists and has the correct type.
    pub fn get_object_id(&self, key: impl AsRef<str>) -> Result<ObjectId> {
        self.get_typed(key, ElementType::ObjectId, Bson::as_object_id)
    }

    /// Get a reference to a UTC datetime value for this key if it exists and has the correct type.
    pub fn get_datetime(&self, key: impl AsRef<str>) -> Result<&crate::DateTime> {
        self.get_typed(key, ElementType::DateTime, Bson::as_datetime)
    }

    /// Get a reference to a regular expression for this key if it exists and has the correct
    /// type.
    pub fn get_regex(&self, key: impl AsRef<str>) -> Result<&Regex> {
        self.get_typed(key, ElementType::RegularExpression, Bson::as_regex)
    }

    /// Returns true if the document contains a field named `key`.
    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.get(key).is_some()
    }

    /// Gets a collection of all keys in the document.
    pub fn keys(&self) -> Keys<'_> {
        Keys {
            inner: self.inner.iter(),
        }
    }

    /// Gets a collection of all values in the document.
    pub fn values(&self) -> Values<'_> {
        Values {
            inner: self.inner.iter(),
        }
    }

    /// Returns the number of fields in the document, duplicates included.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the document contains no elements
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Sets the value of the first field named `key` and returns its old value, or appends a new
    /// field if there is none. Accepts any type that can be converted into Bson.
    pub fn insert<KT: Into<String>, BT: Into<Bson>>(&mut self, key: KT, val: BT) -> Option<Bson> {
        let key = key.into();
        let val = val.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, val)),
            None => {
                self.inner.push((key, val));
                None
            }
        }
    }

    /// Appends a field at the end of the document, even if a field with the same key exists.
    pub fn append<KT: Into<String>, BT: Into<Bson>>(&mut self, key: KT, val: BT) {
        self.inner.push((key.into(), val.into()));
    }

    /// Takes the value of the first field named `key` out of the document, and returns it.
    /// Computes in **O(n)** time.
    pub fn remove(&mut self, key: impl AsRef<str>) -> Option<Bson> {
        let key = key.as_ref();
        let index = self.inner.iter().position(|(k, _)| k == key)?;
        Some(self.inner.remove(index).1)
    }
}

impl Extend<(String, Bson)> for Document {
    fn extend<T: IntoIterator<Item = (String, Bson)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
