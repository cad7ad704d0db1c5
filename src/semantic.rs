use std::fmt;

/// The role of a per-vertex data channel.
///
/// Each semantic has a fixed number of components per vertex; see [Semantic::component_count].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Semantic {
    Position,
    Normal,
    Tangent,
    TexCoord0,
    TexCoord1,
    TexCoord2,
    Color0,
    Joints0,
    Weights0,
}

impl Semantic {
    pub const ALL: [Semantic; 9] = [
        Semantic::Position,
        Semantic::Normal,
        Semantic::Tangent,
        Semantic::TexCoord0,
        Semantic::TexCoord1,
        Semantic::TexCoord2,
        Semantic::Color0,
        Semantic::Joints0,
        Semantic::Weights0,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position of this semantic within [Semantic::ALL].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn component_count(self) -> usize {
        match self {
            Semantic::Position | Semantic::Normal => 3,
            Semantic::TexCoord0 | Semantic::TexCoord1 | Semantic::TexCoord2 => 2,
            Semantic::Tangent | Semantic::Color0 | Semantic::Joints0 | Semantic::Weights0 => 4,
        }
    }

    /// Whether a missing attribute of this semantic can be generated from other attributes.
    #[inline]
    pub const fn is_synthesizable(self) -> bool {
        matches!(self, Semantic::Normal | Semantic::Tangent)
    }

    /// The attribute key used by mesh sources; these are the glTF attribute names.
    pub const fn source_key(self) -> &'static str {
        match self {
            Semantic::Position => "POSITION",
            Semantic::Normal => "NORMAL",
            Semantic::Tangent => "TANGENT",
            Semantic::TexCoord0 => "TEXCOORD_0",
            Semantic::TexCoord1 => "TEXCOORD_1",
            Semantic::TexCoord2 => "TEXCOORD_2",
            Semantic::Color0 => "COLOR_0",
            Semantic::Joints0 => "JOINTS_0",
            Semantic::Weights0 => "WEIGHTS_0",
        }
    }

    pub fn from_source_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.source_key() == key)
    }
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_key())
    }
}
