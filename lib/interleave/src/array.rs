use std::borrow::Cow;

use num_traits::AsPrimitive;

use crate::ComponentType;

/// A dense, tightly-packed array of attribute components.
///
/// Components of consecutive vertices follow each other with no padding; i.e. component `c` of
/// vertex `v` is at `v * components + c`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeArray {
    F32(Vec<f32>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
}

fn widen<T: AsPrimitive<f32>>(data: &[T]) -> Vec<f32> {
    data.iter().map(|v| v.as_()).collect()
}

impl AttributeArray {
    /// Number of components (not vertices) in the array.
    pub fn len(&self) -> usize {
        match self {
            Self::F32(v) => v.len(),
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
            Self::I8(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::I32(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn component_type(&self) -> ComponentType {
        match self {
            Self::F32(_) => ComponentType::F32,
            Self::U8(_) => ComponentType::U8,
            Self::U16(_) => ComponentType::U16,
            Self::U32(_) => ComponentType::U32,
            Self::I8(_) => ComponentType::I8,
            Self::I16(_) => ComponentType::I16,
            Self::I32(_) => ComponentType::I32,
        }
    }

    #[inline]
    pub fn as_f32(&self) -> Option<&[f32]> {
        match self {
            Self::F32(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Widen 3-component elements to 4 components, as when an RGB color is read as RGBA.
    ///
    /// The added component is opaque: `1.0` for floats, or the component type's maximum for
    /// integers. A trailing partial element is dropped.
    pub fn rgb_to_rgba(&self) -> AttributeArray {
        fn pad<T: Copy>(rgb: &[T], alpha: T) -> Vec<T> {
            rgb.chunks_exact(3)
                .flat_map(|c| [c[0], c[1], c[2], alpha])
                .collect()
        }
        match self {
            Self::F32(v) => pad(v, 1.0).into(),
            Self::U8(v) => pad(v, u8::MAX).into(),
            Self::U16(v) => pad(v, u16::MAX).into(),
            Self::U32(v) => pad(v, u32::MAX).into(),
            Self::I8(v) => pad(v, i8::MAX).into(),
            Self::I16(v) => pad(v, i16::MAX).into(),
            Self::I32(v) => pad(v, i32::MAX).into(),
        }
    }

    /// View the array as floats. Integer components are converted by value, not normalized.
    pub fn to_f32(&self) -> Cow<'_, [f32]> {
        match self {
            Self::F32(v) => Cow::Borrowed(v.as_slice()),
            Self::U8(v) => Cow::Owned(widen(v)),
            Self::U16(v) => Cow::Owned(widen(v)),
            Self::U32(v) => Cow::Owned(widen(v)),
            Self::I8(v) => Cow::Owned(widen(v)),
            Self::I16(v) => Cow::Owned(widen(v)),
            Self::I32(v) => Cow::Owned(widen(v)),
        }
    }
}

macro_rules! impl_from_vec {
    ($($T:ty => $variant:ident),+) => {
        $(
            impl From<Vec<$T>> for AttributeArray {
                #[inline]
                fn from(value: Vec<$T>) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_from_vec!(f32 => F32, u8 => U8, u16 => U16, u32 => U32, i8 => I8, i16 => I16, i32 => I32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_view_borrows_floats() {
        let arr = AttributeArray::from(vec![1.0f32, 2.0, 3.0]);
        assert!(matches!(arr.to_f32(), Cow::Borrowed(_)));
        assert_eq!(arr.component_type(), ComponentType::F32);
    }

    #[test]
    fn float_view_converts_integers_by_value() {
        let arr = AttributeArray::from(vec![0u16, 7, 65535]);
        assert_eq!(&*arr.to_f32(), &[0.0, 7.0, 65535.0]);
        let arr = AttributeArray::from(vec![-3i8]);
        assert_eq!(&*arr.to_f32(), &[-3.0]);
        assert_eq!(arr.len(), 1);
        assert!(arr.as_f32().is_none());
    }

    #[test]
    fn rgb_widens_with_opaque_alpha() {
        let rgb = AttributeArray::from(vec![0.5f32, 0.25, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(
            rgb.rgb_to_rgba(),
            AttributeArray::F32(vec![0.5, 0.25, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0])
        );
        let rgb = AttributeArray::from(vec![10u8, 20, 30]);
        assert_eq!(rgb.rgb_to_rgba(), AttributeArray::U8(vec![10, 20, 30, 255]));
        assert_eq!(rgb.rgb_to_rgba().component_type(), ComponentType::U8);
    }
}
