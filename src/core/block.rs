use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Block uses the alpha channel when rendered (water, leaves).
pub const ALPHA: u16 = 1 << 11;
/// Block is animated by the shading stage (water).
pub const ANIMATED: u16 = 1 << 12;
/// Block renders a special top texture when exposed to open air from above
/// (snow-capped stone, grassy dirt).
pub const TOP_OVERLAY: u16 = 1 << 13;
/// Block is not a floor: the bottom face must render even over solid ground
/// (leaves), and vegetation never roots on it.
pub const NOT_FLOOR: u16 = 1 << 14;

const FACE_BIT_OFFSET: u16 = 8;

/// Location of a texture in the atlas: 4 bits of X, 4 bits of Y.
const fn atlas(x: u16, y: u16) -> u16 {
    x | (y << 4)
}

/// A voxel value: texture-atlas material id in the low byte, behavior flags
/// in the high bits. Face-direction bits are OR-ed in only transiently while
/// a mesh is built; stored voxels never carry them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Block(u16);

impl Block {
    pub const AIR: Block = Block(ALPHA | NOT_FLOOR);
    pub const WATER: Block = Block(atlas(0, 0) | ALPHA | ANIMATED);
    pub const SAND_BEACH: Block = Block(atlas(2, 0));
    pub const ICE: Block = Block(atlas(3, 0));
    pub const SNOW: Block = Block(atlas(4, 0));
    pub const STONE: Block = Block(atlas(5, 0));
    pub const STONE_SNOW: Block = Block(atlas(6, 0) | TOP_OVERLAY);
    pub const FLOWERS: Block = Block(atlas(7, 0) | ALPHA);
    pub const DIRT_PLAIN: Block = Block(atlas(2, 1) | TOP_OVERLAY);
    pub const DIRT_JUNGLE: Block = Block(atlas(3, 1) | TOP_OVERLAY);
    pub const DIRT_SNOW: Block = Block(atlas(4, 1) | TOP_OVERLAY);
    pub const SAND_DESERT: Block = Block(atlas(5, 1));
    pub const WOOD_PLAIN: Block = Block(atlas(2, 2));
    pub const WOOD_JUNGLE: Block = Block(atlas(3, 2));
    pub const WOOD_SNOW: Block = Block(atlas(4, 2));
    pub const CACTUS: Block = Block(atlas(5, 2));
    pub const LEAVES_PLAIN: Block = Block(atlas(2, 3) | ALPHA | NOT_FLOOR);
    pub const LEAVES_JUNGLE: Block = Block(atlas(3, 3) | ALPHA | NOT_FLOOR);
    pub const LEAVES_SNOW: Block = Block(atlas(4, 3) | ALPHA | NOT_FLOOR);

    pub const fn raw(self) -> u16 {
        self.0
    }

    #[cfg(test)]
    pub(crate) const fn from_raw(raw: u16) -> Block {
        Block(raw)
    }

    pub const fn is_air(self) -> bool {
        self.0 == Self::AIR.0
    }

    pub const fn is_alpha(self) -> bool {
        self.0 & ALPHA != 0
    }

    pub const fn is_animated(self) -> bool {
        self.0 & ANIMATED != 0
    }

    pub const fn has_top_overlay(self) -> bool {
        self.0 & TOP_OVERLAY != 0
    }

    pub const fn is_floor(self) -> bool {
        self.0 & NOT_FLOOR == 0
    }

    /// The packed vertex data word for one face of this block.
    pub const fn with_face(self, face: FaceDir) -> u16 {
        self.0 | face.bits()
    }
}

impl std::fmt::Debug for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match *self {
            Block::AIR => "AIR",
            Block::WATER => "WATER",
            Block::SAND_BEACH => "SAND_BEACH",
            Block::ICE => "ICE",
            Block::SNOW => "SNOW",
            Block::STONE => "STONE",
            Block::STONE_SNOW => "STONE_SNOW",
            Block::FLOWERS => "FLOWERS",
            Block::DIRT_PLAIN => "DIRT_PLAIN",
            Block::DIRT_JUNGLE => "DIRT_JUNGLE",
            Block::DIRT_SNOW => "DIRT_SNOW",
            Block::SAND_DESERT => "SAND_DESERT",
            Block::WOOD_PLAIN => "WOOD_PLAIN",
            Block::WOOD_JUNGLE => "WOOD_JUNGLE",
            Block::WOOD_SNOW => "WOOD_SNOW",
            Block::CACTUS => "CACTUS",
            Block::LEAVES_PLAIN => "LEAVES_PLAIN",
            Block::LEAVES_JUNGLE => "LEAVES_JUNGLE",
            Block::LEAVES_SNOW => "LEAVES_SNOW",
            _ => return write!(f, "Block({:#06x})", self.0),
        };
        f.write_str(name)
    }
}

/// One of the six axis-aligned face directions of a voxel.
///
/// The discriminants are the face-direction tags packed into the vertex data
/// word (shifted by `FACE_BIT_OFFSET`); using an enum makes a malformed
/// direction unrepresentable instead of a runtime error.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FaceDir {
    Top = 0,
    Front = 1,
    Right = 2,
    Back = 3,
    Left = 4,
    Bottom = 5,
}

impl FaceDir {
    pub const ALL: [FaceDir; 6] = [
        FaceDir::Top,
        FaceDir::Bottom,
        FaceDir::Front,
        FaceDir::Back,
        FaceDir::Left,
        FaceDir::Right,
    ];

    pub const fn bits(self) -> u16 {
        (self as u16) << FACE_BIT_OFFSET
    }

    /// Offset to the adjacent voxel this face looks at.
    pub const fn delta(self) -> IVec3 {
        match self {
            FaceDir::Top => IVec3::new(0, 1, 0),
            FaceDir::Bottom => IVec3::new(0, -1, 0),
            FaceDir::Front => IVec3::new(0, 0, 1),
            FaceDir::Back => IVec3::new(0, 0, -1),
            FaceDir::Left => IVec3::new(-1, 0, 0),
            FaceDir::Right => IVec3::new(1, 0, 0),
        }
    }

    /// True for the four lateral faces (everything but top and bottom).
    pub const fn is_side(self) -> bool {
        !matches!(self, FaceDir::Top | FaceDir::Bottom)
    }
}
