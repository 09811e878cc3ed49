use std::iter;
use std::slice;

/// Whether a handle addresses one element or a collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinality {
    /// `$`: at most one element.
    Single,
    /// `$$`: zero or more elements, in document order.
    Many,
}

/// The elements a handle operates on.
///
/// A `Single` target is `None` only when it came from a lookup that matched
/// nothing.
#[derive(Clone, Debug, PartialEq)]
pub enum Targets<T> {
    /// One element, or nothing if the lookup failed.
    Single(Option<T>),
    /// An ordered collection of elements.
    Many(Vec<T>),
}

impl<T> Default for Targets<T> {
    fn default() -> Targets<T> {
        Targets::Many(Vec::new())
    }
}

impl<T> Targets<T> {
    /// Build targets of the given cardinality from a list of elements. For
    /// `Single`, only the first element is kept.
    pub fn with_cardinality(cardinality: Cardinality, elements: Vec<T>) -> Targets<T> {
        match cardinality {
            Cardinality::Single => Targets::Single(elements.into_iter().next()),
            Cardinality::Many => Targets::Many(elements),
        }
    }

    /// An empty collection with the same cardinality as `self`.
    pub fn empty_like(&self) -> Targets<T> {
        match self {
            Targets::Single(_) => Targets::Single(None),
            Targets::Many(_) => Targets::Many(Vec::new()),
        }
    }

    /// Is this a `Single` target?
    #[inline]
    pub fn is_single(&self) -> bool {
        self.cardinality() == Cardinality::Single
    }

    /// The cardinality of these targets.
    #[inline]
    pub fn cardinality(&self) -> Cardinality {
        match self {
            Targets::Single(_) => Cardinality::Single,
            Targets::Many(_) => Cardinality::Many,
        }
    }

    /// How many elements are addressed.
    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Are no elements addressed at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The first addressed element, if any.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// View the addressed elements as a slice; a `Single` is a slice of length
    /// zero or one.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Targets::Single(el) => match el {
                Some(el) => slice::from_ref(el),
                None => &[],
            },
            Targets::Many(els) => els,
        }
    }

    /// Iterate over the addressed elements in order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Apply `f` to every addressed element, in order.
    ///
    /// Stops at the first failure. Elements already visited keep whatever `f`
    /// did to them.
    pub fn for_each<E, F>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(&T) -> Result<(), E>,
    {
        match self {
            Targets::Single(None) => Ok(()),
            Targets::Single(Some(el)) => f(el),
            Targets::Many(els) => {
                for el in els {
                    f(el)?;
                }
                Ok(())
            }
        }
    }

    /// Map every element, keeping the cardinality.
    pub fn map<U, F>(&self, f: F) -> Targets<U>
    where
        F: FnMut(&T) -> U,
    {
        match self {
            Targets::Single(el) => Targets::Single(el.as_ref().map(f)),
            Targets::Many(els) => Targets::Many(els.iter().map(f).collect()),
        }
    }
}

impl<'a, T> IntoIterator for &'a Targets<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> From<Option<T>> for Targets<T> {
    #[inline]
    fn from(el: Option<T>) -> Targets<T> {
        Targets::Single(el)
    }
}

impl<T> From<Vec<T>> for Targets<T> {
    #[inline]
    fn from(els: Vec<T>) -> Targets<T> {
        Targets::Many(els)
    }
}

impl<T> iter::FromIterator<T> for Targets<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Targets<T> {
        Targets::Many(iter.into_iter().collect())
    }
}

/// Collect `items` into a list without repeats, keeping the first occurrence.
pub(crate) fn dedup_by<T, I, F>(items: I, mut same: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T, &T) -> bool,
{
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.iter().any(|seen| same(seen, &item)) {
            out.push(item);
        }
    }
    out
}
