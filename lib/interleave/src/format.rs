//! Numeric formats of interleaved vertex attributes.
//!
//! Formats are named the way the engine's metadata names them: a channel prefix (`R`, `RG`,
//! `RGB`, `RGBA`) giving the component count, the component width in bits, and a suffix giving
//! the interpretation of each component.
//!
//! | suffix | interpretation                  | widths     |
//! |--------|---------------------------------|------------|
//! | *none* | unsigned, normalized to [0, 1]  | 8, 16      |
//! | `SN`   | signed, normalized to [-1, 1]   | 8, 16      |
//! | `UI`   | unsigned integer                | 8, 16, 32  |
//! | `I`    | signed integer                  | 8, 16, 32  |
//! | `F`    | IEEE float                      | 16, 32     |

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("unrecognized vertex format: {0:?}")]
    Unknown(String),
    #[error("vertex format {0:?} has an unsupported component width")]
    Width(String),
}

/// The inner components of a [VertexFormat]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    U8,
    U16,
    U32,
    I8,
    I16,
    I32,
    F16,
    F32,
}

impl ComponentType {
    pub const fn size(self) -> usize {
        use std::mem::size_of;
        match self {
            ComponentType::U8 => size_of::<u8>(),
            ComponentType::U16 => size_of::<u16>(),
            ComponentType::U32 => size_of::<u32>(),
            ComponentType::I8 => size_of::<i8>(),
            ComponentType::I16 => size_of::<i16>(),
            ComponentType::I32 => size_of::<i32>(),
            ComponentType::F16 => size_of::<half::f16>(),
            ComponentType::F32 => size_of::<f32>(),
        }
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, ComponentType::F16 | ComponentType::F32)
    }
}

/// The layout of one attribute within a vertex record.
///
/// Serialized as its name, ex. `"RGB32F"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VertexFormat {
    pub component: ComponentType,
    /// Number of components per vertex; 1 to 4
    pub count: u8,
    /// Integer components are mapped onto [0, 1] (unsigned) or [-1, 1] (signed) when decoded.
    /// Meaningless for float components.
    pub normalized: bool,
}

impl VertexFormat {
    #[inline]
    pub const fn new(component: ComponentType, count: u8) -> Self {
        Self {
            component,
            count,
            normalized: false,
        }
    }

    #[inline]
    pub const fn normalized(self) -> Self {
        Self {
            normalized: true,
            ..self
        }
    }

    #[inline]
    pub const fn components(self) -> usize {
        self.count as usize
    }

    #[inline]
    pub const fn size_bytes(self) -> usize {
        self.component.size() * self.components()
    }

    /// Whether decoded values of this format are floats (float components, or normalized
    /// integers).
    #[inline]
    pub const fn decodes_to_float(self) -> bool {
        self.component.is_float() || self.normalized
    }
}

const CHANNELS: [(&str, u8); 4] = [("RGBA", 4), ("RGB", 3), ("RG", 2), ("R", 1)];

impl FromStr for VertexFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || FormatError::Unknown(s.to_owned());
        let (rest, count) = CHANNELS
            .iter()
            .find_map(|(prefix, count)| s.strip_prefix(prefix).map(|rest| (rest, *count)))
            .ok_or_else(unknown)?;
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let (width, suffix) = rest.split_at(digits);
        let width: u32 = width.parse().map_err(|_| unknown())?;

        use ComponentType as C;
        let (component, normalized) = match (suffix, width) {
            ("", 8) => (C::U8, true),
            ("", 16) => (C::U16, true),
            ("SN", 8) => (C::I8, true),
            ("SN", 16) => (C::I16, true),
            ("UI", 8) => (C::U8, false),
            ("UI", 16) => (C::U16, false),
            ("UI", 32) => (C::U32, false),
            ("I", 8) => (C::I8, false),
            ("I", 16) => (C::I16, false),
            ("I", 32) => (C::I32, false),
            ("F", 16) => (C::F16, false),
            ("F", 32) => (C::F32, false),
            ("" | "SN" | "UI" | "I" | "F", _) => return Err(FormatError::Width(s.to_owned())),
            _ => return Err(unknown()),
        };
        Ok(Self {
            component,
            count,
            normalized,
        })
    }
}

impl fmt::Display for VertexFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channels = CHANNELS
            .iter()
            .find(|(_, count)| *count == self.count)
            .map_or("?", |(prefix, _)| *prefix);
        let bits = self.component.size() * 8;
        let suffix = match (self.component, self.normalized) {
            (ComponentType::F16 | ComponentType::F32, _) => "F",
            (ComponentType::U8 | ComponentType::U16, true) => "",
            (ComponentType::I8 | ComponentType::I16, true) => "SN",
            (ComponentType::U8 | ComponentType::U16 | ComponentType::U32, _) => "UI",
            (ComponentType::I8 | ComponentType::I16 | ComponentType::I32, _) => "I",
        };
        write!(f, "{channels}{bits}{suffix}")
    }
}

impl TryFrom<String> for VertexFormat {
    type Error = FormatError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VertexFormat> for String {
    fn from(value: VertexFormat) -> Self {
        value.to_string()
    }
}
