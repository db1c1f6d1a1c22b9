//! TileMap: the 3D battlefield grid with per-tile occupants.

use glam::IVec3;
use hecs::Entity;

use cinder_core::enums::{MapPartKind, TileObjectType};

/// An occupant record. Tiles store entity ids, never the entities themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileObject {
    Ground(Entity),
    Feature(Entity),
    LeftWall(Entity),
    RightWall(Entity),
    Unit(Entity),
    Hazard(Entity),
}

impl TileObject {
    /// Occupant record for a map part in the given slot.
    pub fn map_part(kind: MapPartKind, entity: Entity) -> Self {
        match kind {
            MapPartKind::Ground => TileObject::Ground(entity),
            MapPartKind::Feature => TileObject::Feature(entity),
            MapPartKind::LeftWall => TileObject::LeftWall(entity),
            MapPartKind::RightWall => TileObject::RightWall(entity),
        }
    }

    pub fn object_type(&self) -> TileObjectType {
        match self {
            TileObject::Ground(_) => TileObjectType::Ground,
            TileObject::Feature(_) => TileObjectType::Feature,
            TileObject::LeftWall(_) => TileObjectType::LeftWall,
            TileObject::RightWall(_) => TileObjectType::RightWall,
            TileObject::Unit(_) => TileObjectType::Unit,
            TileObject::Hazard(_) => TileObjectType::Hazard,
        }
    }

    /// Entity id if this occupant is a piece of map geometry.
    pub fn map_part_entity(&self) -> Option<Entity> {
        match *self {
            TileObject::Ground(e)
            | TileObject::Feature(e)
            | TileObject::LeftWall(e)
            | TileObject::RightWall(e) => Some(e),
            TileObject::Unit(_) | TileObject::Hazard(_) => None,
        }
    }
}

/// One voxel cell of the battlefield.
#[derive(Debug, Clone, Default)]
pub struct Tile {
    /// Occupants in insertion order, without duplicates.
    owned_objects: Vec<TileObject>,
    /// Line-of-sight reduction contributed by hazards in this cell.
    vision_block: i32,
}

impl Tile {
    pub fn owned_objects(&self) -> &[TileObject] {
        &self.owned_objects
    }

    pub fn contains(&self, object: &TileObject) -> bool {
        self.owned_objects.contains(object)
    }

    /// First hazard occupant, if any.
    pub fn hazard(&self) -> Option<Entity> {
        self.owned_objects.iter().find_map(|obj| match obj {
            TileObject::Hazard(e) => Some(*e),
            TileObject::Ground(_)
            | TileObject::Feature(_)
            | TileObject::LeftWall(_)
            | TileObject::RightWall(_)
            | TileObject::Unit(_) => None,
        })
    }

    pub fn vision_block(&self) -> i32 {
        self.vision_block
    }

    /// Store a new vision blockage. Returns whether the value changed.
    pub fn update_vision_block(&mut self, value: i32) -> bool {
        if self.vision_block == value {
            return false;
        }
        self.vision_block = value;
        true
    }
}

/// Bounds-checked 3D grid of tiles.
#[derive(Debug, Clone)]
pub struct TileMap {
    size: IVec3,
    /// Row-major: x fastest, then y, then z.
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Number of tiles in a map of `size`, or None if an extent is negative
    /// or the count overflows.
    pub fn tile_count(size: IVec3) -> Option<usize> {
        let x = usize::try_from(size.x).ok()?;
        let y = usize::try_from(size.y).ok()?;
        let z = usize::try_from(size.z).ok()?;
        x.checked_mul(y)?.checked_mul(z)
    }

    /// Create an empty map. Negative extents are treated as zero; a size
    /// whose tile count overflows gives an empty map.
    pub fn new(size: IVec3) -> Self {
        let size = size.max(IVec3::ZERO);
        let (size, count) = match Self::tile_count(size) {
            Some(count) => (size, count),
            None => (IVec3::ZERO, 0),
        };
        Self {
            size,
            tiles: vec![Tile::default(); count],
        }
    }

    pub fn size(&self) -> IVec3 {
        self.size
    }

    pub fn in_bounds(&self, pos: IVec3) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.z >= 0
            && pos.x < self.size.x
            && pos.y < self.size.y
            && pos.z < self.size.z
    }

    fn index(&self, pos: IVec3) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        let (x, y, z) = (pos.x as usize, pos.y as usize, pos.z as usize);
        let (width, depth) = (self.size.x as usize, self.size.y as usize);
        Some((z * depth + y) * width + x)
    }

    /// Tile at `pos`, or None outside the map.
    pub fn tile(&self, pos: IVec3) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    pub fn tile_mut(&mut self, pos: IVec3) -> Option<&mut Tile> {
        self.index(pos).map(move |i| &mut self.tiles[i])
    }

    /// Add an occupant. Returns false outside the map or if already present.
    pub fn add_object(&mut self, pos: IVec3, object: TileObject) -> bool {
        match self.tile_mut(pos) {
            Some(tile) if !tile.contains(&object) => {
                tile.owned_objects.push(object);
                true
            }
            _ => false,
        }
    }

    /// Remove an occupant. Returns whether it was present.
    pub fn remove_object(&mut self, pos: IVec3, object: TileObject) -> bool {
        let Some(tile) = self.tile_mut(pos) else {
            return false;
        };
        let before = tile.owned_objects.len();
        tile.owned_objects.retain(|obj| *obj != object);
        tile.owned_objects.len() != before
    }

    /// Copy of a tile's occupants, for passes that may mutate the tile.
    pub fn snapshot_objects(&self, pos: IVec3) -> Vec<TileObject> {
        self.tile(pos)
            .map(|tile| tile.owned_objects.clone())
            .unwrap_or_default()
    }

    pub fn contains_object(&self, pos: IVec3, object: &TileObject) -> bool {
        self.tile(pos).is_some_and(|tile| tile.contains(object))
    }

    /// Update a tile's vision blockage. Returns whether it changed.
    pub fn update_vision_block(&mut self, pos: IVec3, value: i32) -> bool {
        self.tile_mut(pos)
            .is_some_and(|tile| tile.update_vision_block(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(count: usize) -> Vec<Entity> {
        let mut world = hecs::World::new();
        (0..count).map(|i| world.spawn((i,))).collect()
    }

    #[test]
    fn test_bounds() {
        let map = TileMap::new(IVec3::new(4, 3, 2));
        assert!(map.in_bounds(IVec3::new(0, 0, 0)));
        assert!(map.in_bounds(IVec3::new(3, 2, 1)));
        assert!(!map.in_bounds(IVec3::new(4, 0, 0)));
        assert!(!map.in_bounds(IVec3::new(0, -1, 0)));
        assert!(!map.in_bounds(IVec3::new(0, 0, 2)));
        assert!(map.tile(IVec3::new(-1, 0, 0)).is_none());
        assert!(map.tile(IVec3::new(1, 1, 1)).is_some());
    }

    #[test]
    fn test_tile_count_overflow() {
        assert_eq!(TileMap::tile_count(IVec3::new(4, 3, 2)), Some(24));
        assert_eq!(TileMap::tile_count(IVec3::new(-1, 3, 2)), None);
        let huge = IVec3::new(i32::MAX, i32::MAX, i32::MAX);
        assert_eq!(TileMap::tile_count(huge), None);
        let map = TileMap::new(huge);
        assert_eq!(map.size(), IVec3::ZERO);
        assert!(!map.in_bounds(IVec3::ZERO));
    }

    #[test]
    fn test_hazard_skips_other_occupants() {
        let ids = entities(3);
        let mut map = TileMap::new(IVec3::splat(2));
        let pos = IVec3::ZERO;
        map.add_object(pos, TileObject::Ground(ids[0]));
        map.add_object(pos, TileObject::Unit(ids[1]));
        assert_eq!(map.tile(pos).unwrap().hazard(), None);
        map.add_object(pos, TileObject::Hazard(ids[2]));
        assert_eq!(map.tile(pos).unwrap().hazard(), Some(ids[2]));
    }

    #[test]
    fn test_add_remove_preserves_order_and_ignores_duplicates() {
        let ids = entities(3);
        let mut map = TileMap::new(IVec3::splat(3));
        let pos = IVec3::new(1, 1, 0);

        assert!(map.add_object(pos, TileObject::Ground(ids[0])));
        assert!(map.add_object(pos, TileObject::Unit(ids[1])));
        assert!(map.add_object(pos, TileObject::Hazard(ids[2])));
        assert!(!map.add_object(pos, TileObject::Unit(ids[1])));
        assert!(!map.add_object(IVec3::new(9, 0, 0), TileObject::Unit(ids[1])));

        let objects = map.tile(pos).unwrap().owned_objects();
        assert_eq!(objects.len(), 3);
        assert_eq!(objects[0].object_type(), TileObjectType::Ground);
        assert_eq!(map.tile(pos).unwrap().hazard(), Some(ids[2]));

        assert!(map.remove_object(pos, TileObject::Unit(ids[1])));
        assert!(!map.remove_object(pos, TileObject::Unit(ids[1])));
        assert_eq!(map.tile(pos).unwrap().owned_objects().len(), 2);
    }

    #[test]
    fn test_snapshot_is_detached_from_tile() {
        let ids = entities(2);
        let mut map = TileMap::new(IVec3::splat(2));
        let pos = IVec3::ZERO;
        map.add_object(pos, TileObject::Feature(ids[0]));
        map.add_object(pos, TileObject::Unit(ids[1]));

        let snapshot = map.snapshot_objects(pos);
        map.remove_object(pos, TileObject::Feature(ids[0]));

        assert_eq!(snapshot.len(), 2);
        assert!(!map.contains_object(pos, &snapshot[0]));
        assert!(map.contains_object(pos, &snapshot[1]));
    }

    #[test]
    fn test_vision_block_change_detection() {
        let mut map = TileMap::new(IVec3::splat(2));
        let pos = IVec3::new(1, 0, 1);
        assert!(!map.update_vision_block(pos, 0));
        assert!(map.update_vision_block(pos, 7));
        assert!(!map.update_vision_block(pos, 7));
        assert_eq!(map.tile(pos).unwrap().vision_block(), 7);
        assert!(!map.update_vision_block(IVec3::splat(5), 3));
    }

    #[test]
    fn test_map_part_records() {
        let ids = entities(1);
        let wall = TileObject::map_part(MapPartKind::LeftWall, ids[0]);
        assert_eq!(wall.object_type(), TileObjectType::LeftWall);
        assert_eq!(wall.map_part_entity(), Some(ids[0]));
        assert_eq!(TileObject::Unit(ids[0]).map_part_entity(), None);
    }
}
