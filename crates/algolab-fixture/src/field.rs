//! Field adapters: bind a column to one field of a record type.
//!
//! An adapter is a closed variant over the scalar kinds. Each variant holds a
//! [`Binding`] with a reader/writer pair for the field plus the default value
//! used for new rows and for sparse output.

use crate::codec::{Scalar, ScalarKind};
use crate::segment::StringSegment;

/// Reader/writer pair for a field of type `C` inside a record `T`.
pub struct Binding<T, C> {
    get: fn(&T) -> &C,
    get_mut: fn(&mut T) -> &mut C,
    default: C,
}

impl<T, C: Scalar> Binding<T, C> {
    /// Bind a field with the given default.
    pub fn new(get: fn(&T) -> &C, get_mut: fn(&mut T) -> &mut C, default: C) -> Self {
        Self {
            get,
            get_mut,
            default,
        }
    }

    fn set_from_text(&self, record: &mut T, text: StringSegment<'_>) -> bool {
        match C::parse(text) {
            Some(value) => {
                *(self.get_mut)(record) = value;
                true
            }
            None => false,
        }
    }

    fn to_text(&self, record: &T) -> String {
        (self.get)(record).encode()
    }

    fn equals_default(&self, record: &T) -> bool {
        *(self.get)(record) == self.default
    }

    fn reset(&self, record: &mut T) {
        *(self.get_mut)(record) = self.default.clone();
    }
}

/// Type-erased access to one field of `T`.
pub enum FieldAdapter<T> {
    Integer(Binding<T, i32>),
    Boolean(Binding<T, bool>),
    Text(Binding<T, String>),
    IntSequence(Binding<T, Vec<i32>>),
}

/// Conversion from a typed binding into the matching adapter variant.
pub trait IntoFieldAdapter<T> {
    fn into_adapter(self) -> FieldAdapter<T>;
}

impl<T> IntoFieldAdapter<T> for Binding<T, i32> {
    fn into_adapter(self) -> FieldAdapter<T> {
        FieldAdapter::Integer(self)
    }
}

impl<T> IntoFieldAdapter<T> for Binding<T, bool> {
    fn into_adapter(self) -> FieldAdapter<T> {
        FieldAdapter::Boolean(self)
    }
}

impl<T> IntoFieldAdapter<T> for Binding<T, String> {
    fn into_adapter(self) -> FieldAdapter<T> {
        FieldAdapter::Text(self)
    }
}

impl<T> IntoFieldAdapter<T> for Binding<T, Vec<i32>> {
    fn into_adapter(self) -> FieldAdapter<T> {
        FieldAdapter::IntSequence(self)
    }
}

impl<T> FieldAdapter<T> {
    /// Bind a field whose default is the value-initialized form of its type.
    pub fn bind<C>(get: fn(&T) -> &C, get_mut: fn(&mut T) -> &mut C) -> Self
    where
        C: Scalar,
        Binding<T, C>: IntoFieldAdapter<T>,
    {
        Binding::new(get, get_mut, C::default()).into_adapter()
    }

    /// Bind a field with an explicit default.
    pub fn bind_with_default<C>(
        get: fn(&T) -> &C,
        get_mut: fn(&mut T) -> &mut C,
        default: C,
    ) -> Self
    where
        C: Scalar,
        Binding<T, C>: IntoFieldAdapter<T>,
    {
        Binding::new(get, get_mut, default).into_adapter()
    }

    /// The scalar kind of the bound field.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Integer(_) => ScalarKind::Integer,
            Self::Boolean(_) => ScalarKind::Boolean,
            Self::Text(_) => ScalarKind::Text,
            Self::IntSequence(_) => ScalarKind::IntSequence,
        }
    }

    /// Parse `text` into the field. Leaves the record untouched on failure.
    pub fn set_from_text(&self, record: &mut T, text: StringSegment<'_>) -> bool {
        match self {
            Self::Integer(b) => b.set_from_text(record, text),
            Self::Boolean(b) => b.set_from_text(record, text),
            Self::Text(b) => b.set_from_text(record, text),
            Self::IntSequence(b) => b.set_from_text(record, text),
        }
    }

    /// Encode the field.
    pub fn to_text(&self, record: &T) -> String {
        match self {
            Self::Integer(b) => b.to_text(record),
            Self::Boolean(b) => b.to_text(record),
            Self::Text(b) => b.to_text(record),
            Self::IntSequence(b) => b.to_text(record),
        }
    }

    /// Whether the field holds its configured default.
    pub fn equals_default_value(&self, record: &T) -> bool {
        match self {
            Self::Integer(b) => b.equals_default(record),
            Self::Boolean(b) => b.equals_default(record),
            Self::Text(b) => b.equals_default(record),
            Self::IntSequence(b) => b.equals_default(record),
        }
    }

    /// Reset the field to its configured default.
    pub fn set_default_value(&self, record: &mut T) {
        match self {
            Self::Integer(b) => b.reset(record),
            Self::Boolean(b) => b.reset(record),
            Self::Text(b) => b.reset(record),
            Self::IntSequence(b) => b.reset(record),
        }
    }
}

/// Build a [`FieldAdapter`] for `Record.field`, optionally with a default.
///
/// ```
/// use algolab_fixture::{FieldAdapter, field};
///
/// #[derive(Default)]
/// struct Job {
///     start: i32,
///     tags: Vec<i32>,
/// }
///
/// let start: FieldAdapter<Job> = field!(Job, start, -1);
/// let tags: FieldAdapter<Job> = field!(Job, tags);
/// let mut job = Job::default();
/// start.set_default_value(&mut job);
/// assert_eq!(job.start, -1);
/// assert_eq!(tags.to_text(&job), "[]");
/// ```
#[macro_export]
macro_rules! field {
    ($record:ty, $($field:ident).+) => {
        $crate::FieldAdapter::bind(
            |record: &$record| &record.$($field).+,
            |record: &mut $record| &mut record.$($field).+,
        )
    };
    ($record:ty, $($field:ident).+, $default:expr) => {
        $crate::FieldAdapter::bind_with_default(
            |record: &$record| &record.$($field).+,
            |record: &mut $record| &mut record.$($field).+,
            $default,
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Sample {
        count: i32,
        flag: bool,
        note: String,
        values: Vec<i32>,
    }

    #[test]
    fn test_from_text_writes_field() {
        let adapter: FieldAdapter<Sample> = crate::field!(Sample, values);
        let mut sample = Sample::default();
        assert!(adapter.set_from_text(&mut sample, StringSegment::new("[3,1,2]")));
        assert_eq!(sample.values, vec![3, 1, 2]);
        assert_eq!(adapter.kind(), ScalarKind::IntSequence);
    }

    #[test]
    fn test_failed_parse_leaves_record_unmodified() {
        let adapter: FieldAdapter<Sample> = crate::field!(Sample, count, -1);
        let mut sample = Sample {
            count: 12,
            ..Sample::default()
        };
        assert!(!adapter.set_from_text(&mut sample, StringSegment::new("twelve")));
        assert_eq!(sample.count, 12);
    }

    #[test]
    fn test_default_tracking() {
        let count: FieldAdapter<Sample> = crate::field!(Sample, count, -1);
        let note: FieldAdapter<Sample> = crate::field!(Sample, note);
        let mut sample = Sample::default();

        assert!(!count.equals_default_value(&sample));
        count.set_default_value(&mut sample);
        assert_eq!(sample.count, -1);
        assert!(count.equals_default_value(&sample));

        assert!(note.equals_default_value(&sample));
        sample.note = "hint".to_string();
        assert!(!note.equals_default_value(&sample));
    }

    #[test]
    fn test_to_text_per_kind() {
        let sample = Sample {
            count: -5,
            flag: true,
            note: "x".to_string(),
            values: vec![],
        };
        let flag: FieldAdapter<Sample> = crate::field!(Sample, flag);
        let note: FieldAdapter<Sample> = crate::field!(Sample, note);
        let count: FieldAdapter<Sample> = crate::field!(Sample, count);
        let values: FieldAdapter<Sample> = crate::field!(Sample, values);
        assert_eq!(flag.to_text(&sample), "yes");
        assert_eq!(note.to_text(&sample), "\"x\"");
        assert_eq!(count.to_text(&sample), "-5");
        assert_eq!(values.to_text(&sample), "[]");
    }
}
