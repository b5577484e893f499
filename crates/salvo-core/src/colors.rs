//! Player color table.

use serde::{Deserialize, Serialize};

/// Identifier of a player color. Stored in saves by its table index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColorId {
    #[default]
    Red,
    Orange,
    Brown,
    Yellow,
    Green,
    Cyan,
    Blue,
    Pink,
    Purple,
    Grey,
}

/// Display data for one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorEntry {
    pub id: ColorId,
    pub display_name: &'static str,
    /// Packed opaque ARGB.
    pub rgb: u32,
}

pub const COLOR_TABLE: [ColorEntry; 10] = [
    ColorEntry { id: ColorId::Red, display_name: "red", rgb: 0xffef_2929 },
    ColorEntry { id: ColorId::Orange, display_name: "orange", rgb: 0xffff_bb44 },
    ColorEntry { id: ColorId::Brown, display_name: "brown", rgb: 0xffa6_7a3e },
    ColorEntry { id: ColorId::Yellow, display_name: "yellow", rgb: 0xfffc_e94f },
    ColorEntry { id: ColorId::Green, display_name: "green", rgb: 0xff06_d030 },
    ColorEntry { id: ColorId::Cyan, display_name: "cyan", rgb: 0xff8d_efef },
    ColorEntry { id: ColorId::Blue, display_name: "blue", rgb: 0xff72_9fcf },
    ColorEntry { id: ColorId::Pink, display_name: "pink", rgb: 0xffff_83e9 },
    ColorEntry { id: ColorId::Purple, display_name: "purple", rgb: 0xffad_7fa8 },
    ColorEntry { id: ColorId::Grey, display_name: "grey", rgb: 0xffd3_d7cf },
];

impl ColorId {
    pub fn entry(self) -> &'static ColorEntry {
        &COLOR_TABLE[self as usize]
    }

    pub fn display_name(self) -> &'static str {
        self.entry().display_name
    }

    pub fn rgb(self) -> u32 {
        self.entry().rgb
    }
}

/// Replace the alpha channel of a packed ARGB color.
pub fn with_alpha(rgb: u32, alpha: u8) -> u32 {
    (rgb & 0x00ff_ffff) | ((alpha as u32) << 24)
}
