//! Conversion of interleaved vertex records and packed index regions into dense arrays.

use facets_common::item_with;
use num_traits::AsPrimitive;

use crate::{
    schema::{AttributeDescriptor, BundleDescriptor, IndexView},
    AttributeArray, ComponentType, VertexFormat,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("region ends at byte {end}, past the end of a {len}-byte buffer")]
    OutOfBounds { end: usize, len: usize },
    #[error("region size overflows usize")]
    Overflow,
    #[error("attribute {name:?} ends at byte {end} of a {stride}-byte vertex record")]
    AttributeOverrunsStride {
        name: String,
        end: usize,
        stride: usize,
    },
    #[error("unsupported index stride: {{1, 2, 4}} ∌ {0}")]
    UnsupportedIndexStride(usize),
}

/// A decoded attribute, paired with the descriptor it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAttribute {
    pub descriptor: AttributeDescriptor,
    pub values: AttributeArray,
}

/// Dense arrays decoded from one interleaved region.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VertexBundle {
    pub vertex_count: usize,
    pub attributes: Vec<DecodedAttribute>,
}

impl VertexBundle {
    pub fn get(&self, name: &str) -> Option<&DecodedAttribute> {
        self.attributes.iter().find(|a| a.descriptor.name == name)
    }
}

/// A scalar which can be read from little-endian bytes.
trait Component: Copy + AsPrimitive<f32> {
    const SIZE: usize;
    /// Largest representable value; integer formats are normalized against this.
    fn max_value() -> f32;
    fn read_le(bytes: &[u8]) -> Self;
}

item_with! {T: u8, u16, u32, i8, i16, i32 => impl Component for T {
    const SIZE: usize = std::mem::size_of::<T>();

    #[inline]
    fn max_value() -> f32 {
        T::MAX.as_()
    }

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        let mut raw = [0u8; std::mem::size_of::<T>()];
        raw.copy_from_slice(&bytes[..Self::SIZE]);
        T::from_le_bytes(raw)
    }
}}

#[inline]
fn read_f32(bytes: &[u8]) -> f32 {
    f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[inline]
fn read_f16(bytes: &[u8]) -> f32 {
    half::f16::from_le_bytes([bytes[0], bytes[1]]).to_f32()
}

#[inline]
fn read_normalized<T: Component>(bytes: &[u8]) -> f32 {
    let v: f32 = T::read_le(bytes).as_();
    // signed formats have one more negative value than positive; glTF clamps it to -1
    (v / T::max_value()).max(-1.0)
}

/// Position of a strided region inside a buffer.
#[derive(Debug, Clone, Copy)]
struct Region {
    base: usize,
    stride: usize,
    count: usize,
}

impl Region {
    /// Ensure every record of `extent` bytes lies inside a buffer of `len` bytes.
    fn check(&self, extent: usize, len: usize) -> Result<(), DecodeError> {
        if self.count == 0 {
            return Ok(());
        }
        let end = (self.count - 1)
            .checked_mul(self.stride)
            .and_then(|last| last.checked_add(self.base))
            .and_then(|last| last.checked_add(extent))
            .ok_or(DecodeError::Overflow)?;
        if end > len {
            return Err(DecodeError::OutOfBounds { end, len });
        }
        Ok(())
    }

    /// Read `components` consecutive scalars of `size` bytes from every record.
    ///
    /// The region must have been [checked](Self::check) against `buffer`.
    fn gather<T>(
        &self,
        buffer: &[u8],
        components: usize,
        size: usize,
        read: impl Fn(&[u8]) -> T,
    ) -> Vec<T> {
        let mut out = Vec::with_capacity(self.count * components);
        for v in 0..self.count {
            let record = self.base + v * self.stride;
            for c in 0..components {
                let at = record + c * size;
                out.push(read(&buffer[at..at + size]));
            }
        }
        out
    }
}

fn decode_attribute(buffer: &[u8], region: Region, format: VertexFormat) -> AttributeArray {
    let n = format.components();
    let size = format.component.size();
    use ComponentType as C;
    match (format.component, format.normalized) {
        (C::F32, _) => region.gather(buffer, n, size, read_f32).into(),
        (C::F16, _) => region.gather(buffer, n, size, read_f16).into(),
        (C::U8, true) => region.gather(buffer, n, size, read_normalized::<u8>).into(),
        (C::U16, true) => region.gather(buffer, n, size, read_normalized::<u16>).into(),
        (C::U32, true) => region.gather(buffer, n, size, read_normalized::<u32>).into(),
        (C::I8, true) => region.gather(buffer, n, size, read_normalized::<i8>).into(),
        (C::I16, true) => region.gather(buffer, n, size, read_normalized::<i16>).into(),
        (C::I32, true) => region.gather(buffer, n, size, read_normalized::<i32>).into(),
        (C::U8, false) => region.gather(buffer, n, size, u8::read_le).into(),
        (C::U16, false) => region.gather(buffer, n, size, u16::read_le).into(),
        (C::U32, false) => region.gather(buffer, n, size, u32::read_le).into(),
        (C::I8, false) => region.gather(buffer, n, size, i8::read_le).into(),
        (C::I16, false) => region.gather(buffer, n, size, i16::read_le).into(),
        (C::I32, false) => region.gather(buffer, n, size, i32::read_le).into(),
    }
}

/// Decode every attribute of one interleaved region.
#[tracing::instrument(
    level = "trace",
    skip_all,
    fields(offset = bundle.view.offset, count = bundle.view.count)
)]
pub fn decode_bundle(
    buffer: &[u8],
    bundle: &BundleDescriptor,
) -> Result<VertexBundle, DecodeError> {
    let stride = bundle.stride();
    let mut attributes = Vec::with_capacity(bundle.attributes.len());
    for (descriptor, offset) in bundle.attributes.iter().zip(bundle.attribute_offsets()) {
        let format = descriptor.effective_format();
        let end = offset
            .checked_add(format.size_bytes())
            .ok_or(DecodeError::Overflow)?;
        if end > stride {
            return Err(DecodeError::AttributeOverrunsStride {
                name: descriptor.name.clone(),
                end,
                stride,
            });
        }
        let region = Region {
            base: bundle
                .view
                .offset
                .checked_add(offset)
                .ok_or(DecodeError::Overflow)?,
            stride,
            count: bundle.view.count,
        };
        region.check(format.size_bytes(), buffer.len())?;
        tracing::trace!(
            name = descriptor.name.as_str(),
            format = %format,
            offset,
            "decoding vertex attribute"
        );
        attributes.push(DecodedAttribute {
            descriptor: descriptor.clone(),
            values: decode_attribute(buffer, region, format),
        });
    }
    Ok(VertexBundle {
        vertex_count: bundle.view.count,
        attributes,
    })
}

/// Decode each interleaved region into a [VertexBundle], preserving order.
pub fn decode_vertex_bundles(
    buffer: &[u8],
    bundles: &[BundleDescriptor],
) -> Result<Vec<VertexBundle>, DecodeError> {
    bundles.iter().map(|b| decode_bundle(buffer, b)).collect()
}

/// Decode a packed index region, widening each index to `u32`. Winding order is preserved.
pub fn decode_index_buffer(buffer: &[u8], view: &IndexView) -> Result<Vec<u32>, DecodeError> {
    if !matches!(view.stride, 1 | 2 | 4) {
        return Err(DecodeError::UnsupportedIndexStride(view.stride));
    }
    let region = Region {
        base: view.offset,
        stride: view.stride,
        count: view.count,
    };
    region.check(view.stride, buffer.len())?;
    let indices = match view.stride {
        1 => region.gather(buffer, 1, 1, |b| u32::from(u8::read_le(b))),
        2 => region.gather(buffer, 1, 2, |b| u32::from(u16::read_le(b))),
        _ => region.gather(buffer, 1, 4, u32::read_le),
    };
    tracing::trace!(count = indices.len(), stride = view.stride, "decoded index buffer");
    Ok(indices)
}
