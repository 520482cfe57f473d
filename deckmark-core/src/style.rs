//! Compact style tags carried by styled runs.
//!
//! A run never keeps its markup around; the emphasis it was found under is folded into a single
//! byte. The wire form is a bitmask: bit 0 is Normal, bit 1 Bold, bit 2 Italic. Normal is set at
//! encode time only when neither Bold nor Italic is, so the two never coexist in an encoded tag.
//!
//! The empty tag is meaningful on its own: it decodes to all-false and means "no explicit style",
//! which is not the same thing as an explicit Normal. The compiler uses that distinction when it
//! decides whether a run gets a style update at all (see [`crate::common::compile::StyleMode`]).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct StyleTag: u8 {
        const NORMAL = 1 << 0;
        const BOLD = 1 << 1;
        const ITALIC = 1 << 2;
    }
}

/// The three flags recovered from a [`StyleTag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodedStyle {
    pub bold: bool,
    pub italic: bool,
    pub normal: bool,
}

impl DecodedStyle {
    /// True when the run asks for bold or italic.
    pub fn is_emphasized(&self) -> bool {
        self.bold || self.italic
    }

    /// True when the tag carried any flag at all.
    pub fn is_explicit(&self) -> bool {
        self.bold || self.italic || self.normal
    }
}

impl StyleTag {
    /// Encodes a bold/italic pair. Neither flag yields an explicit Normal tag.
    pub fn encode(bold: bool, italic: bool) -> Self {
        let mut tag = StyleTag::empty();
        if bold {
            tag |= StyleTag::BOLD;
        }
        if italic {
            tag |= StyleTag::ITALIC;
        }
        if !bold && !italic {
            tag |= StyleTag::NORMAL;
        }
        tag
    }

    pub fn decode(self) -> DecodedStyle {
        DecodedStyle {
            bold: self.contains(StyleTag::BOLD),
            italic: self.contains(StyleTag::ITALIC),
            normal: self.contains(StyleTag::NORMAL),
        }
    }

    /// Returns the tag with bold and/or italic added, re-encoded so Normal is dropped.
    pub fn with_emphasis(self, bold: bool, italic: bool) -> Self {
        let current = self.decode();
        StyleTag::encode(current.bold || bold, current.italic || italic)
    }

    pub fn to_byte(self) -> u8 {
        self.bits()
    }

    /// Reads a wire byte. Bits outside the three known flags are dropped.
    pub fn from_byte(byte: u8) -> Self {
        StyleTag::from_bits_truncate(byte)
    }
}
