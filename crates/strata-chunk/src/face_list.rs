use hashbrown::HashMap;
use strata_blocks::{FaceData, FaceKey};

/// Visible faces of one chunk: a dense array for upload plus a key index
/// for constant-time toggling. Never holds two faces with the same key.
#[derive(Clone, Debug, Default)]
pub struct FaceList {
    faces: Vec<FaceData>,
    index: HashMap<FaceKey, usize>,
}

impl FaceList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[FaceData] {
        &self.faces
    }

    #[inline]
    pub fn contains(&self, key: FaceKey) -> bool {
        self.index.contains_key(&key)
    }

    #[inline]
    pub fn get(&self, key: FaceKey) -> Option<FaceData> {
        self.index.get(&key).map(|&i| self.faces[i])
    }

    /// Returns false if a face with the same key is already present.
    pub fn insert(&mut self, face: FaceData) -> bool {
        let key = face.key();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.faces.len());
        self.faces.push(face);
        true
    }

    pub fn remove(&mut self, key: FaceKey) -> Option<FaceData> {
        let i = self.index.remove(&key)?;
        let removed = self.faces.swap_remove(i);
        if let Some(moved) = self.faces.get(i) {
            self.index.insert(moved.key(), i);
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.faces.clear();
        self.index.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &FaceData> {
        self.faces.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_blocks::BlockFace;
    use strata_geom::IVec3;

    fn face(x: i32, f: BlockFace) -> FaceData {
        FaceData::new(IVec3::new(x, 0, 0), f, 3)
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut l = FaceList::new();
        assert!(l.insert(face(1, BlockFace::Top)));
        assert!(!l.insert(face(1, BlockFace::Top)));
        assert!(l.insert(face(1, BlockFace::Bottom)));
        assert_eq!(l.len(), 2);
    }

    #[test]
    fn swap_remove_keeps_index_consistent() {
        let mut l = FaceList::new();
        for x in 0..5 {
            l.insert(face(x, BlockFace::Left));
        }
        assert!(l.remove(face(1, BlockFace::Left).key()).is_some());
        assert!(l.remove(face(1, BlockFace::Left).key()).is_none());
        for x in [0, 2, 3, 4] {
            let k = face(x, BlockFace::Left).key();
            assert_eq!(l.get(k).map(|f| f.key()), Some(k));
        }
        // The element moved into slot 1 must still be removable.
        assert!(l.remove(face(4, BlockFace::Left).key()).is_some());
        assert_eq!(l.len(), 3);
        assert!(l.iter().all(|f| l.contains(f.key())));
    }
}
