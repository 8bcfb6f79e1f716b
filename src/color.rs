use serde::Serialize;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Display palette for tags. Order is significant: it is indexed by hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagColor {
    Red,
    Pink,
    Grape,
    Violet,
    Indigo,
    Blue,
    Cyan,
    Teal,
    Green,
    Lime,
    Yellow,
    Orange,
}

pub const PALETTE: [TagColor; 12] = [
    TagColor::Red,
    TagColor::Pink,
    TagColor::Grape,
    TagColor::Violet,
    TagColor::Indigo,
    TagColor::Blue,
    TagColor::Cyan,
    TagColor::Teal,
    TagColor::Green,
    TagColor::Lime,
    TagColor::Yellow,
    TagColor::Orange,
];

impl TagColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagColor::Red => "red",
            TagColor::Pink => "pink",
            TagColor::Grape => "grape",
            TagColor::Violet => "violet",
            TagColor::Indigo => "indigo",
            TagColor::Blue => "blue",
            TagColor::Cyan => "cyan",
            TagColor::Teal => "teal",
            TagColor::Green => "green",
            TagColor::Lime => "lime",
            TagColor::Yellow => "yellow",
            TagColor::Orange => "orange",
        }
    }
}

impl std::fmt::Display for TagColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// 32-bit FNV-1a over the UTF-16 code units of `s`.
pub fn fnv1a(s: &str) -> u32 {
    s.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Maps a tag name, exactly as displayed, to its palette entry.
pub fn color_for(tag_name: &str) -> TagColor {
    PALETTE[(fnv1a(tag_name) % PALETTE.len() as u32) as usize]
}
