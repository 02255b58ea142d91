//! Separator-joined sequences of scalars.
//!
//! Decoding accepts any separator (an empty one means `,`); encoding always
//! joins with `,`. There is no escaping: a text item containing the separator
//! splits into several items on the way back.

use chrono::TimeDelta;

use crate::error::Result;
use crate::kind::ElementKind;
use crate::scalar::{Scalar, ScalarValue};

/// Separator used for encoding, and for decoding when none is given.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Split `text` on `separator` and parse every item as `kind`.
///
/// The first item that fails to parse aborts the whole sequence. Empty text
/// is the empty sequence.
///
/// # Examples
///
/// ```
/// use objmeta::{sequence, ElementKind, ScalarValue};
///
/// let values = sequence::decode("1;2", ";", ElementKind::U32).unwrap();
/// assert_eq!(values, vec![ScalarValue::U32(1), ScalarValue::U32(2)]);
///
/// assert!(sequence::decode("1,x", "", ElementKind::U32).is_err());
/// ```
pub fn decode(text: &str, separator: &str, kind: ElementKind) -> Result<Vec<ScalarValue>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let separator = if separator.is_empty() {
        DEFAULT_SEPARATOR
    } else {
        separator
    };

    let scalar = kind.scalar();
    text.split(separator)
        .map(|item| scalar.parse(item))
        .collect()
}

/// Join formatted values with [`DEFAULT_SEPARATOR`].
///
/// The first value that can't be stored (see [`ScalarValue::encode`]) fails
/// the whole sequence.
pub fn encode(values: &[ScalarValue]) -> Result<String> {
    let items = values
        .iter()
        .map(ScalarValue::encode)
        .collect::<Result<Vec<_>>>()?;
    Ok(items.join(DEFAULT_SEPARATOR))
}

/// Scalar types allowed as sequence items.
pub trait Element: Scalar {
    const ELEMENT: ElementKind;
}

macro_rules! impl_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const ELEMENT: ElementKind = ElementKind::$variant;
            }
        )*
    };
}

impl_element! {
    String => Text,
    bool => Bool,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    TimeDelta => Duration,
}
