//! [`Reflect`] implementations for standard library types

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use super::{Node, Reflect, Shape};

macro_rules! reflect_signed {
    ($($ty:ty),*) => {
        $(
            impl Reflect for $ty {
                fn reflect(&self) -> Shape<'_> {
                    Shape::Int(*self as i64)
                }
            }
        )*
    };
}

macro_rules! reflect_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Reflect for $ty {
                fn reflect(&self) -> Shape<'_> {
                    Shape::Uint(*self as u64)
                }
            }
        )*
    };
}

macro_rules! reflect_unsupported {
    ($($ty:ty => $name:literal),*) => {
        $(
            impl Reflect for $ty {
                fn reflect(&self) -> Shape<'_> {
                    Shape::Unsupported($name)
                }
            }
        )*
    };
}

reflect_signed!(i8, i16, i32, i64, isize);
reflect_unsigned!(u8, u16, u32, u64, usize);
reflect_unsupported!(bool => "bool", char => "char", () => "unit");

impl Reflect for f32 {
    fn reflect(&self) -> Shape<'_> {
        Shape::Float32(*self)
    }
}

impl Reflect for f64 {
    fn reflect(&self) -> Shape<'_> {
        Shape::Float(*self)
    }
}

impl Reflect for str {
    fn reflect(&self) -> Shape<'_> {
        Shape::Str(self)
    }
}

impl Reflect for String {
    fn reflect(&self) -> Shape<'_> {
        Shape::Str(self.as_str())
    }
}

impl Reflect for Cow<'_, str> {
    fn reflect(&self) -> Shape<'_> {
        Shape::Str(&**self)
    }
}

/// Shared references are transparent: `&T` reflects exactly as `T`.
impl<T: Reflect + ?Sized> Reflect for &T {
    fn reflect(&self) -> Shape<'_> {
        (**self).reflect()
    }
}

// Owning pointer types dereference one level.

impl<T: Reflect> Reflect for Box<T> {
    fn reflect(&self) -> Shape<'_> {
        Shape::Pointer(Some(Node::Borrowed(&**self)))
    }
}

impl<T: Reflect> Reflect for Rc<T> {
    fn reflect(&self) -> Shape<'_> {
        Shape::Pointer(Some(Node::Borrowed(&**self)))
    }
}

impl<T: Reflect> Reflect for Arc<T> {
    fn reflect(&self) -> Shape<'_> {
        Shape::Pointer(Some(Node::Borrowed(&**self)))
    }
}

/// `Option` is a nullable pointer: `None` is nil.
impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> Shape<'_> {
        Shape::pointer(self.as_ref())
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect(&self) -> Shape<'_> {
        Shape::sequence(self.iter())
    }
}

impl<T: Reflect> Reflect for [T] {
    fn reflect(&self) -> Shape<'_> {
        Shape::sequence(self.iter())
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect(&self) -> Shape<'_> {
        Shape::sequence(self.iter())
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn reflect(&self) -> Shape<'_> {
        Shape::sequence(self.iter())
    }
}

impl<K, V, S> Reflect for HashMap<K, V, S> {
    fn reflect(&self) -> Shape<'_> {
        Shape::Unsupported("map")
    }
}

impl<K, V> Reflect for BTreeMap<K, V> {
    fn reflect(&self) -> Shape<'_> {
        Shape::Unsupported("map")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widening() {
        assert!(matches!((-3i8).reflect(), Shape::Int(-3)));
        assert!(matches!(u64::MAX.reflect(), Shape::Uint(u64::MAX)));
        assert!(matches!(300u16.reflect(), Shape::Uint(300)));
    }

    #[test]
    fn test_float_width_is_kept() {
        assert!(matches!(0.3f32.reflect(), Shape::Float32(v) if v == 0.3f32));
        assert!(matches!(0.3f64.reflect(), Shape::Float(v) if v == 0.3));
    }

    #[test]
    fn test_strings() {
        let owned = String::from("abc");
        assert!(matches!(owned.reflect(), Shape::Str("abc")));
        assert!(matches!("xyz".reflect(), Shape::Str("xyz")));
        let cow: Cow<'_, str> = Cow::Borrowed("c");
        assert!(matches!(cow.reflect(), Shape::Str("c")));
    }

    #[test]
    fn test_references_are_transparent() {
        let n = 7i32;
        let r = &n;
        assert!(matches!((&r).reflect(), Shape::Int(7)));
        let text: &str = "abc";
        assert!(matches!(Reflect::reflect(&text), Shape::Str("abc")));
    }

    #[test]
    fn test_box_points_at_value() {
        let boxed = Box::new(42i64);
        let Shape::Pointer(Some(target)) = boxed.reflect() else {
            panic!("expected pointer");
        };
        assert!(matches!(target.reflect(), Shape::Int(42)));
    }

    #[test]
    fn test_option_none_is_nil() {
        assert!(matches!(None::<String>.reflect(), Shape::Pointer(None)));
        let rc = Rc::new(1.5f64);
        assert!(matches!(rc.reflect(), Shape::Pointer(Some(_))));
    }

    #[test]
    fn test_sequences_borrow_elements() {
        let values = vec![1u8, 2, 3];
        let Shape::Sequence(items) = values.reflect() else {
            panic!("expected sequence");
        };
        assert_eq!(items.len(), 3);
        assert!(matches!(items[2].reflect(), Shape::Uint(3)));

        let slice: &[i32] = &[7, 8];
        assert!(matches!(slice.reflect(), Shape::Sequence(ref s) if s.len() == 2));
    }
}
