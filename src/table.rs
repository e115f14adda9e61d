use super::{
    error::Result,
    reader::{BinaryReader, Readable},
    writer::{BinaryWriter, Writable},
};
use log::trace;
use std::io::{Read, Seek, Write};
use std::ops::{Index, IndexMut};
use std::slice;
use std::vec;

/// How a table encodes its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
    Char,
    String,
    /// Elements encode themselves one at a time.
    Custom,
}

/// A type that can be stored in a [`Table`].
///
/// Scalars override the bulk methods so a whole table decodes in one read.
/// Any other `Readable + Writable + Default` type opts in with an empty impl
/// and is read and written element by element:
///
/// ```
/// use riffio::{BinaryReader, BinaryWriter, Element, Readable, Result, Writable};
/// use std::io::{Read, Seek, Write};
///
/// #[derive(Default)]
/// struct Point(u16, u16);
///
/// impl Readable for Point {
///     fn read<S: Read + Seek>(&mut self, r: &mut BinaryReader<S>) -> Result<()> {
///         self.0 = r.read_u16()?;
///         self.1 = r.read_u16()?;
///         Ok(())
///     }
/// }
///
/// impl Writable for Point {
///     fn write<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
///         w.write_u16(self.0)?;
///         w.write_u16(self.1)
///     }
/// }
///
/// impl Element for Point {}
/// ```
pub trait Element: Readable + Writable + Default {
    const KIND: ElementKind = ElementKind::Custom;

    fn read_elements<S: Read + Seek>(
        r: &mut BinaryReader<S>,
        count: usize,
    ) -> Result<Vec<Self>> {
        let mut items = Vec::new();
        for _ in 0..count {
            items.push(r.read_value()?);
        }
        Ok(items)
    }

    fn write_elements<W: Write + Seek>(
        w: &mut BinaryWriter<W>,
        items: &[Self],
    ) -> Result<()> {
        for item in items {
            item.write(w)?;
        }
        Ok(())
    }
}

macro_rules! scalar_element {
    ($ty:ty, $kind:ident, $read:ident, $read_many:ident, $write:ident, $write_many:ident) => {
        impl Readable for $ty {
            fn read<S: Read + Seek>(&mut self, r: &mut BinaryReader<S>) -> Result<()> {
                *self = r.$read()?;
                Ok(())
            }
        }

        impl Writable for $ty {
            fn write<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
                w.$write(*self)
            }
        }

        impl Element for $ty {
            const KIND: ElementKind = ElementKind::$kind;

            fn read_elements<S: Read + Seek>(
                r: &mut BinaryReader<S>,
                count: usize,
            ) -> Result<Vec<Self>> {
                r.$read_many(count)
            }

            fn write_elements<W: Write + Seek>(
                w: &mut BinaryWriter<W>,
                items: &[Self],
            ) -> Result<()> {
                w.$write_many(items)
            }
        }
    };
}

scalar_element!(u8, U8, read_u8, read_bytes, write_u8, write_bytes);
scalar_element!(i8, I8, read_i8, read_i8s, write_i8, write_i8s);
scalar_element!(u16, U16, read_u16, read_u16s, write_u16, write_u16s);
scalar_element!(i16, I16, read_i16, read_i16s, write_i16, write_i16s);
scalar_element!(u32, U32, read_u32, read_u32s, write_u32, write_u32s);
scalar_element!(i32, I32, read_i32, read_i32s, write_i32, write_i32s);
scalar_element!(u64, U64, read_u64, read_u64s, write_u64, write_u64s);
scalar_element!(i64, I64, read_i64, read_i64s, write_i64, write_i64s);
scalar_element!(f32, F32, read_f32, read_f32s, write_f32, write_f32s);
scalar_element!(f64, F64, read_f64, read_f64s, write_f64, write_f64s);
scalar_element!(char, Char, read_char, read_chars, write_char, write_chars);

impl Readable for String {
    fn read<S: Read + Seek>(&mut self, r: &mut BinaryReader<S>) -> Result<()> {
        *self = r.read_string()?;
        Ok(())
    }
}

impl Writable for String {
    fn write<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        w.write_string(self)
    }
}

impl Element for String {
    const KIND: ElementKind = ElementKind::String;

    fn read_elements<S: Read + Seek>(
        r: &mut BinaryReader<S>,
        count: usize,
    ) -> Result<Vec<Self>> {
        r.read_strings(count)
    }

    fn write_elements<W: Write + Seek>(
        w: &mut BinaryWriter<W>,
        items: &[Self],
    ) -> Result<()> {
        w.write_strings(items)
    }
}

/// An ordered sequence serialized as a `u32` count followed by its elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table<T> {
    items: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table { items: Vec::new() }
    }
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Table { items }
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Replaces the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, value: T) -> T {
        std::mem::replace(&mut self.items[index], value)
    }

    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    pub fn insert(&mut self, index: usize, value: T) {
        self.items.insert(index, value);
    }

    pub fn remove(&mut self, index: usize) -> T {
        self.items.remove(index)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T: PartialEq> Table<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }

    pub fn position(&self, value: &T) -> Option<usize> {
        self.items.iter().position(|item| item == value)
    }

    /// Removes the first element equal to `value`.
    pub fn remove_item(&mut self, value: &T) -> bool {
        match self.position(value) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }
}

impl<T> Index<usize> for Table<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for Table<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T> IntoIterator for Table<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Table<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> std::iter::FromIterator<T> for Table<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Table {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Table<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T: Element> Readable for Table<T> {
    fn read<S: Read + Seek>(&mut self, r: &mut BinaryReader<S>) -> Result<()> {
        let count = r.read_u32()? as usize;
        trace!("reading {} {:?} table element(s)", count, T::KIND);
        self.items = T::read_elements(r, count)?;
        Ok(())
    }
}

impl<T: Element> Writable for Table<T> {
    fn write<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        trace!("writing {} {:?} table element(s)", self.items.len(), T::KIND);
        w.write_len(self.items.len())?;
        T::write_elements(w, &self.items)
    }
}

impl<T: Element> Element for Table<T> {}
