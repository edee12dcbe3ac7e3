//! Palette type for 16-colour indexed palettes.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, TbinError};

use super::Colour;

/// Number of colour slots in a palette. A slot is addressed by a 4-bit index.
pub const PALETTE_SIZE: usize = 16;

/// Stable handle for a palette within a [`SpriteSheet`](super::SpriteSheet).
///
/// Handles are assigned in insertion order and double as the palette's
/// position in the serialized palette table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct PaletteId(pub(crate) u8);

impl PaletteId {
    /// The palette used by tiles that have no override.
    pub const DEFAULT: Self = Self(0);

    /// Position of the palette in its sheet's palette list.
    pub fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered list of up to 16 colours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// Palette name
    pub name: String,

    colours: Vec<Colour>,
}

impl Palette {
    /// Create a new empty palette.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colours: Vec::with_capacity(PALETTE_SIZE),
        }
    }

    /// Create a palette from a list of colours.
    pub fn from_colours(
        name: impl Into<String>,
        colours: impl IntoIterator<Item = Colour>,
    ) -> Result<Self> {
        let mut palette = Self::new(name);
        for colour in colours {
            palette.push(colour)?;
        }
        Ok(palette)
    }

    /// Create a palette with all 16 slots populated.
    pub fn from_slots(name: impl Into<String>, slots: [Colour; PALETTE_SIZE]) -> Self {
        Self {
            name: name.into(),
            colours: slots.to_vec(),
        }
    }

    /// Append a colour to the next free slot.
    pub fn push(&mut self, colour: Colour) -> Result<u8> {
        if self.colours.len() == PALETTE_SIZE {
            return Err(TbinError::CountOverflow {
                what: "palette colours",
                count: PALETTE_SIZE + 1,
                limit: PALETTE_SIZE,
            });
        }
        self.colours.push(colour);
        Ok((self.colours.len() - 1) as u8)
    }

    /// Get the colour in a slot.
    pub fn get(&self, slot: u8) -> Option<Colour> {
        self.colours.get(slot as usize).copied()
    }

    /// All populated slots, in order.
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// Get the number of populated slots.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}
