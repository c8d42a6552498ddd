use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::piece::Shape;

/// Block colors, one per catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    Orange,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Orange,
    ];

    /// Uniformly random color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Color {
        Color::ALL[rng.random_range(0..Color::ALL.len())]
    }

    /// CSS-style hex code
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Red => "#FF0000",
            Color::Green => "#00FF00",
            Color::Blue => "#0000FF",
            Color::Yellow => "#FFFF00",
            Color::Magenta => "#FF00FF",
            Color::Cyan => "#00FFFF",
            Color::Orange => "#FFA500",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

// Rotation-0 matrices, 1 = filled
const SHAPE_I: &[&[u8]] = &[&[1, 1, 1, 1]];
const SHAPE_J: &[&[u8]] = &[&[1, 0, 0], &[1, 1, 1]];
const SHAPE_L: &[&[u8]] = &[&[0, 0, 1], &[1, 1, 1]];
const SHAPE_O: &[&[u8]] = &[&[1, 1], &[1, 1]];
const SHAPE_S: &[&[u8]] = &[&[0, 1, 1], &[1, 1, 0]];
const SHAPE_Z: &[&[u8]] = &[&[1, 1, 0], &[0, 1, 1]];
const SHAPE_T: &[&[u8]] = &[&[0, 1, 0], &[1, 1, 1]];

impl PieceKind {
    /// Catalog order; the index pairs each kind with its canonical color
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Uniformly random piece kind
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::ALL.len())]
    }

    pub fn shape(&self) -> Shape {
        let matrix = match self {
            PieceKind::I => SHAPE_I,
            PieceKind::J => SHAPE_J,
            PieceKind::L => SHAPE_L,
            PieceKind::O => SHAPE_O,
            PieceKind::S => SHAPE_S,
            PieceKind::Z => SHAPE_Z,
            PieceKind::T => SHAPE_T,
        };
        Shape::new(
            matrix
                .iter()
                .map(|row| row.iter().map(|&cell| cell == 1).collect())
                .collect(),
        )
    }

    /// Canonical color, by catalog index
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Red,
            PieceKind::J => Color::Green,
            PieceKind::L => Color::Blue,
            PieceKind::O => Color::Yellow,
            PieceKind::S => Color::Magenta,
            PieceKind::Z => Color::Cyan,
            PieceKind::T => Color::Orange,
        }
    }
}
