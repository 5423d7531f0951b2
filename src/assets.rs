/// Named sprites and the transforms used to derive variants from them.
///
/// A `Surface` is the terminal stand-in for an image: a glyph, a colour
/// and an optional heading.  Rotation and mirroring act on the heading so
/// the eight player sprites can all be derived from one source sprite.

use std::collections::HashMap;

use crossterm::style::Color;
use thiserror::Error;

use crate::entities::{BombColor, Direction, EnemyKind};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AssetError {
    #[error("unknown sprite `{0}`")]
    Unknown(String),

    #[error("sprite `{0}` has an empty glyph")]
    Empty(String),
}

/// Every sprite the game asks for at startup.
pub const REQUIRED: [&str; 10] = [
    "bird",
    "bird_joy",
    "bird_defeated",
    "shuriken",
    "explosion",
    "alien1",
    "alien2",
    "alien3",
    "bomb",
    "background",
];

#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub glyph: String,
    pub color: Color,
    /// Counter-clockwise degrees, East = 0. `None` for sprites without
    /// an orientation.
    pub heading: Option<i32>,
    pub mirrored: bool,
    /// Faded variant shown during the invulnerability flicker.
    pub translucent: bool,
}

impl Surface {
    pub fn new(glyph: &str, color: Color) -> Self {
        Self {
            glyph: glyph.to_string(),
            color,
            heading: None,
            mirrored: false,
            translucent: false,
        }
    }

    pub fn facing(mut self, degrees: i32) -> Self {
        self.heading = Some(degrees.rem_euclid(360));
        self
    }

    pub fn rotate(&self, degrees: i32) -> Self {
        let mut out = self.clone();
        out.heading = self.heading.map(|h| (h + degrees).rem_euclid(360));
        out
    }

    /// Horizontal flip: East becomes West, NorthEast becomes NorthWest.
    pub fn mirror(&self) -> Self {
        let mut out = self.clone();
        out.heading = self.heading.map(|h| (180 - h).rem_euclid(360));
        out.mirrored = !self.mirrored;
        out
    }

    pub fn translucent(&self) -> Self {
        Self {
            translucent: true,
            ..self.clone()
        }
    }

    pub fn with_color(&self, color: Color) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }

    /// Text drawn for this surface: the glyph followed by a heading arrow.
    pub fn text(&self) -> String {
        match self.heading {
            Some(h) => format!("{}{}", self.glyph, arrow(h)),
            None => self.glyph.clone(),
        }
    }
}

/// Arrow character for the nearest 45° heading.
pub fn arrow(degrees: i32) -> char {
    const ARROWS: [char; 8] = ['→', '↗', '↑', '↖', '←', '↙', '↓', '↘'];
    let sector = ((degrees.rem_euclid(360) + 22) / 45) % 8;
    ARROWS[sector as usize]
}

// ── Library ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct AssetLibrary {
    sprites: HashMap<String, Surface>,
}

impl AssetLibrary {
    /// The built-in sprite set.
    pub fn builtin() -> Self {
        let entries = [
            // Source sprite faces West; East is derived by mirroring.
            ("bird", Surface::new("@", Color::White).facing(180)),
            ("bird_joy", Surface::new("^o^", Color::Yellow)),
            ("bird_defeated", Surface::new("x_x", Color::DarkRed)),
            ("shuriken", Surface::new("✦", Color::Cyan).facing(0)),
            ("explosion", Surface::new("✸", Color::DarkYellow)),
            ("alien1", Surface::new("<▼>", Color::Green)),
            ("alien2", Surface::new("(◉)", Color::Red)),
            ("alien3", Surface::new("{Ѫ}", Color::Magenta)),
            ("bomb", Surface::new("●", Color::White)),
            ("background", Surface::new("·", Color::DarkBlue)),
        ];
        Self {
            sprites: entries
                .into_iter()
                .map(|(name, surface)| (name.to_string(), surface))
                .collect(),
        }
    }

    /// Built-in set with glyph overrides applied.  Unknown names are
    /// rejected so a typo in the config is not silently ignored.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Result<Self, AssetError> {
        let mut library = Self::builtin();
        for (name, glyph) in overrides {
            let surface = library
                .sprites
                .get_mut(name)
                .ok_or_else(|| AssetError::Unknown(name.clone()))?;
            if glyph.trim().is_empty() {
                return Err(AssetError::Empty(name.clone()));
            }
            surface.glyph = glyph.clone();
        }
        library.check()?;
        Ok(library)
    }

    pub fn get(&self, name: &str) -> Result<&Surface, AssetError> {
        self.sprites
            .get(name)
            .ok_or_else(|| AssetError::Unknown(name.to_string()))
    }

    /// Verify every required sprite resolves.
    pub fn check(&self) -> Result<(), AssetError> {
        for name in REQUIRED {
            let surface = self.get(name)?;
            if surface.glyph.is_empty() {
                return Err(AssetError::Empty(name.to_string()));
            }
        }
        Ok(())
    }
}

// ── Resolved sprite set ───────────────────────────────────────────────────────

/// Everything the renderer needs, resolved once at startup.
#[derive(Clone, Debug)]
pub struct SpriteSet {
    pub player: PlayerSprites,
    pub shuriken: Surface,
    pub explosion: [Surface; 2],
    pub aliens: [Surface; 3],
    pub bomb: Surface,
    pub background: Surface,
}

impl SpriteSet {
    pub fn load(library: &AssetLibrary) -> Result<Self, AssetError> {
        let explosion = library.get("explosion")?.clone();
        Ok(Self {
            player: PlayerSprites::derive(library)?,
            shuriken: library.get("shuriken")?.clone(),
            explosion: [explosion.clone(), explosion.mirror().with_color(Color::Red)],
            aliens: [
                library.get("alien1")?.clone(),
                library.get("alien2")?.clone(),
                library.get("alien3")?.clone(),
            ],
            bomb: library.get("bomb")?.clone(),
            background: library.get("background")?.clone(),
        })
    }

    pub fn alien(&self, kind: EnemyKind) -> &Surface {
        match kind {
            EnemyKind::Saucer => &self.aliens[0],
            EnemyKind::Squid => &self.aliens[1],
            EnemyKind::Crab => &self.aliens[2],
        }
    }

    pub fn bomb(&self, color: BombColor) -> Surface {
        let color = match color {
            BombColor::Red => Color::Red,
            BombColor::Green => Color::Green,
            BombColor::Blue => Color::Blue,
            BombColor::Yellow => Color::Yellow,
            BombColor::Magenta => Color::Magenta,
            BombColor::Cyan => Color::Cyan,
        };
        self.bomb.with_color(color)
    }

    pub fn shuriken(&self, facing: Direction) -> Surface {
        self.shuriken.rotate(facing.degrees())
    }
}

/// The eight facing sprites plus their translucent variants.
#[derive(Clone, Debug)]
pub struct PlayerSprites {
    facing: HashMap<Direction, Surface>,
    faded: HashMap<Direction, Surface>,
    pub joy: Surface,
    pub defeated: Surface,
}

impl PlayerSprites {
    pub fn derive(library: &AssetLibrary) -> Result<Self, AssetError> {
        let west = library.get("bird")?.clone();
        let east = west.mirror();

        let facing: HashMap<Direction, Surface> = [
            (Direction::East, east.clone()),
            (Direction::NorthEast, east.rotate(45)),
            (Direction::North, east.rotate(90)),
            (Direction::NorthWest, west.rotate(-45)),
            (Direction::West, west.clone()),
            (Direction::SouthWest, west.rotate(45)),
            (Direction::South, east.rotate(-90)),
            (Direction::SouthEast, east.rotate(-45)),
        ]
        .into_iter()
        .collect();
        let faded = facing
            .iter()
            .map(|(dir, surface)| (*dir, surface.translucent()))
            .collect();

        Ok(Self {
            facing,
            faded,
            joy: library.get("bird_joy")?.clone(),
            defeated: library.get("bird_defeated")?.clone(),
        })
    }

    pub fn facing(&self, direction: Direction, faded: bool) -> &Surface {
        let table = if faded { &self.faded } else { &self.facing };
        // Both tables are filled for every direction in `derive`.
        &table[&direction]
    }
}
