use std::collections::{HashMap, HashSet};

use blake3::Hash;

use crate::component::ComponentId;
use crate::projector::{CanvasProjection, ProjectedComponent};

#[derive(Debug, Clone)]
pub struct GeometryState {
    pub geometry: ProjectedComponent,
    hash: Hash,
    pub is_dirty: bool,
}

impl GeometryState {
    fn new(geometry: ProjectedComponent) -> Self {
        Self {
            hash: geometry_hash(&geometry),
            geometry,
            is_dirty: true,
        }
    }

    fn update(&mut self, geometry: &ProjectedComponent) -> bool {
        let new_hash = geometry_hash(geometry);
        if new_hash == self.hash {
            return false;
        }
        self.geometry = geometry.clone();
        self.hash = new_hash;
        self.is_dirty = true;
        true
    }
}

fn geometry_hash(geometry: &ProjectedComponent) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&geometry.id.get().to_le_bytes());
    hasher.update(&[geometry.region.index() as u8, geometry.alignment as u8]);
    hasher.update(&(geometry.layer as u64).to_le_bytes());
    for value in [
        geometry.rect.x,
        geometry.rect.y,
        geometry.rect.width,
        geometry.rect.height,
        geometry.opacity,
    ] {
        hasher.update(&value.to_bits().to_le_bytes());
    }
    hasher.update(&[
        geometry.selected as u8,
        geometry.locked as u8,
        geometry.overflow as u8,
    ]);
    hasher.finalize()
}

/// Tracks the last projected geometry per component so a renderer only
/// redraws what changed between two projections.
#[derive(Debug, Default)]
pub struct GeometryRegistry {
    entries: HashMap<ComponentId, GeometryState>,
    dirty: HashSet<ComponentId>,
    removed: Vec<ComponentId>,
}

impl GeometryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync(&mut self, projection: &CanvasProjection) {
        use std::collections::hash_map::Entry;

        for geometry in &projection.components {
            match self.entries.entry(geometry.id) {
                Entry::Occupied(mut entry) => {
                    if entry.get_mut().update(geometry) {
                        self.dirty.insert(geometry.id);
                    }
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(GeometryState::new(geometry.clone()));
                    self.dirty.insert(geometry.id);
                }
            }
        }

        // Hidden components drop out of the projection.
        let present: HashSet<_> = projection.components.iter().map(|g| g.id).collect();
        let gone: Vec<_> = self
            .entries
            .keys()
            .filter(|id| !present.contains(*id))
            .copied()
            .collect();
        for id in gone {
            self.entries.remove(&id);
            self.dirty.remove(&id);
            self.removed.push(id);
        }
    }

    /// Drain changed entries, ordered bottom layer first.
    pub fn take_dirty(&mut self) -> Vec<(ComponentId, ProjectedComponent)> {
        let ids: Vec<_> = self.dirty.drain().collect();
        let mut changed: Vec<_> = ids
            .into_iter()
            .filter_map(|id| {
                self.entries.get_mut(&id).map(|state| {
                    state.is_dirty = false;
                    (id, state.geometry.clone())
                })
            })
            .collect();
        changed.sort_by_key(|(_, geometry)| geometry.layer);
        changed
    }

    pub fn take_removed(&mut self) -> Vec<ComponentId> {
        let mut removed = std::mem::take(&mut self.removed);
        removed.sort();
        removed
    }

    pub fn geometry_of(&self, id: ComponentId) -> Option<&ProjectedComponent> {
        self.entries.get(&id).map(|state| &state.geometry)
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::CanvasComponent;
    use crate::device::DeviceProfile;
    use crate::engine::ConstraintEngine;
    use crate::projector::CanvasProjector;

    fn project(components: &[CanvasComponent], zoom: f32) -> CanvasProjection {
        let engine = ConstraintEngine::default();
        let phone = DeviceProfile::new("test", "Test", 360, 800).unwrap();
        CanvasProjector::new(&engine, &phone, zoom).project(components, None)
    }

    fn components() -> Vec<CanvasComponent> {
        vec![
            CanvasComponent::new(ComponentId::new(1), "a"),
            CanvasComponent::new(ComponentId::new(2), "b"),
        ]
    }

    #[test]
    fn first_sync_marks_everything_dirty() {
        let mut registry = GeometryRegistry::new();
        registry.sync(&project(&components(), 1.0));
        let dirty = registry.take_dirty();
        assert_eq!(
            dirty.iter().map(|(id, _)| id.get()).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(!registry.has_dirty());
    }

    #[test]
    fn unchanged_geometry_stays_clean() {
        let mut registry = GeometryRegistry::new();
        let projection = project(&components(), 1.0);
        registry.sync(&projection);
        registry.take_dirty();

        registry.sync(&projection);
        assert!(registry.take_dirty().is_empty());
    }

    #[test]
    fn only_changed_entries_are_reported() {
        let mut registry = GeometryRegistry::new();
        let mut list = components();
        registry.sync(&project(&list, 1.0));
        registry.take_dirty();

        list[1].opacity = 0.5;
        registry.sync(&project(&list, 1.0));
        let dirty = registry.take_dirty();
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty[0].0, ComponentId::new(2));
        assert_eq!(registry.geometry_of(ComponentId::new(2)).unwrap().opacity, 0.5);
    }

    #[test]
    fn hidden_components_are_reported_as_removed() {
        let mut registry = GeometryRegistry::new();
        let mut list = components();
        registry.sync(&project(&list, 1.0));
        registry.take_dirty();

        list[0].visible = false;
        registry.sync(&project(&list, 1.0));
        assert_eq!(registry.take_removed(), vec![ComponentId::new(1)]);
        assert!(registry.take_removed().is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn zoom_change_dirties_every_entry() {
        let mut registry = GeometryRegistry::new();
        let list = components();
        registry.sync(&project(&list, 1.0));
        registry.take_dirty();

        registry.sync(&project(&list, 1.5));
        assert_eq!(registry.take_dirty().len(), 2);
    }
}
