//! Homogeneous list codec.
//!
//! A [`SerialList<T>`] holds codecs of exactly one element type. Elements
//! can be inserted as ready-made `T` values or as raw [`Value`]s, which are
//! converted through `T`'s construct-from conversion before the list is
//! touched.
//!
//! Wire format: u32 element count, then each element's encoding in order.

use std::fmt;
use std::ops::Index;

use log::trace;

use crate::codec::{Endianness, Reader, Writer};
use crate::error::{DecodeError, EncodeError, ValidationError};
use crate::limits::MAX_LIST_LEN;
use crate::serial::{construct_from, Assign, Codec, Field, Serializable};
use crate::value::Value;

/// An ordered list of `T` codecs.
#[derive(Debug, Clone)]
pub struct SerialList<T> {
    items: Vec<T>,
    endianness: Endianness,
}

impl<T> Default for SerialList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            endianness: Endianness::Native,
        }
    }
}

impl<T: Serializable> SerialList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list whose count prefix uses the given byte order.
    pub fn with_endianness(endianness: Endianness) -> Self {
        Self {
            items: Vec::new(),
            endianness,
        }
    }

    /// Appends an element.
    pub fn append(&mut self, item: T) {
        self.items.push(item);
    }

    /// Inserts an element before `index`; indexes past the end append.
    pub fn insert(&mut self, index: usize, item: T) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    /// Converts a raw value to `T` and appends it.
    ///
    /// The list is unchanged if the conversion fails.
    pub fn append_value(&mut self, value: impl Into<Value>) -> Result<(), ValidationError> {
        let value: Value = value.into();
        let item = T::try_from(value)?;
        self.append(item);
        Ok(())
    }

    /// Converts a raw value to `T` and inserts it before `index`.
    pub fn insert_value(
        &mut self,
        index: usize,
        value: impl Into<Value>,
    ) -> Result<(), ValidationError> {
        let value: Value = value.into();
        let item = T::try_from(value)?;
        self.insert(index, item);
        Ok(())
    }

    /// Replaces the contents with the converted `values`.
    ///
    /// Every value is converted before the list is modified; on the first
    /// failure the list keeps its previous contents.
    pub fn set<I>(&mut self, values: I) -> Result<(), ValidationError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let items = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let value: Value = value.into();
                T::try_from(value).map_err(|source| ValidationError::InvalidElement {
                    index,
                    source: Box::new(source),
                })
            })
            .collect::<Result<Vec<T>, _>>()?;
        self.items = items;
        Ok(())
    }

    /// Replaces the contents with ready-made elements.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = T>) {
        self.items = items.into_iter().collect();
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns the element at `index` mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Removes and returns the element at `index`.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Removes the last element.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterates over the elements mutably.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Returns the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consumes the list, returning the elements.
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }

    /// Returns the byte order of the count prefix.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Changes the byte order of the count prefix.
    pub fn set_endianness(&mut self, endianness: Endianness) {
        self.endianness = endianness;
    }
}

impl<T: PartialEq> PartialEq for SerialList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: fmt::Display> fmt::Display for SerialList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}

impl<T> Index<usize> for SerialList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T: Serializable> FromIterator<T> for SerialList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            endianness: Endianness::Native,
        }
    }
}

impl<T: Serializable> Extend<T> for SerialList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for SerialList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SerialList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serializable> Codec for SerialList<T> {
    fn type_name(&self) -> &'static str {
        "SerialList"
    }

    fn write(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.write_len(self.items.len(), self.endianness, MAX_LIST_LEN, "list")?;
        for item in &self.items {
            item.write(writer)?;
        }
        Ok(())
    }

    fn load_in_place(&mut self, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
        let count = reader.read_len(self.endianness, MAX_LIST_LEN, "list")?;
        trace!("decoding {} list elements at offset {}", count, reader.position());

        // Every element takes at least one byte unless it is empty, so the
        // remaining input bounds the up-front allocation.
        let mut items = Vec::with_capacity(count.min(reader.remaining_len()));
        for _ in 0..count {
            let mut item = T::default();
            item.load_in_place(reader)?;
            items.push(item);
        }
        self.items = items;
        Ok(())
    }

    fn get_value(&self) -> Option<Value> {
        self.items
            .iter()
            .map(Codec::get_value)
            .collect::<Option<Vec<_>>>()
            .map(Value::List)
    }

    fn set_value(&mut self, value: Value) -> Result<(), ValidationError> {
        self.set(value.into_list()?)
    }
}

impl<T: Serializable> TryFrom<Value> for SerialList<T> {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        construct_from(value)
    }
}

impl<T: Serializable> Serializable for SerialList<T> {
    const SETTABLE: bool = T::SETTABLE;
}

impl<T: Serializable> Field for SerialList<T> {
    type Output<'a> = &'a SerialList<T>;

    fn read(&self) -> &SerialList<T> {
        self
    }
}

impl<T, I> Assign<I> for SerialList<T>
where
    T: Serializable,
    I: IntoIterator,
    I::Item: Into<Value>,
{
    fn assign(&mut self, values: I) -> Result<(), ValidationError> {
        self.set(values)
    }
}
