//! The World owns every scene object, the loaded scenes and the singleton registry.
//!
//! # Architecture
//!
//! - **Objects**: named nodes with a local [`Transform`], an optional parent and ordered
//!   component slots, keyed by generational [`Entity`] handles.
//! - **Scenes**: objects belong to a loaded scene. Scene loads requested while playing are
//!   applied at the next frame boundary; a `Single` load destroys every object outside the
//!   persistent scene.
//! - **Singletons**: see [`crate::singleton`]. Singleton hosts are persistent and cannot be
//!   destroyed before [`World::notify_shutdown`].
//! - **Destruction**: [`World::destroy`] is deferred to the end of the frame while playing,
//!   [`World::destroy_immediate`] removes the object and its children at once.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut world = World::new(Mode::Play);
//! let ship = world.spawn("Ship");
//! world.add_component(ship, LinearMoveForward::new(4.0))?;
//! world.set_local_position(ship, Vec3::new(0.0, 1.0, 0.0))?;
//! ```
//!
//! The world is single threaded; it stays on the thread that drives the frame loop.

use std::any::type_name;
use std::collections::{BTreeMap, VecDeque};
use std::marker::PhantomData;

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::input::Input;
use crate::core::time::Time;
use crate::error::{Error, Result};
use crate::scene::component::{Component, ComponentId, Context};
use crate::scene::object::{ComponentSlot, Object};
use crate::scene::scenes::SceneManager;
use crate::scene::{
    Allocator, AutoLoadScenes, Entity, LoadMode, Prefab, SceneCatalog, SceneId, SceneInfo, Transform,
};
use crate::singleton::{Singleton, Singletons};

/// Whether the world is being edited or played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// No lifecycle hooks run and destruction is immediate.
    Edit,
    #[default]
    Play,
}

pub struct World {
    mode: Mode,

    /// Entity ids for objects.
    entities: Allocator,

    /// Every live object. Ordered so hooks run in a stable order.
    objects: BTreeMap<Entity, Object>,

    scenes: SceneManager,

    singletons: Singletons,

    input: Input,

    time: Time,

    /// Objects destroyed this frame, removed at the end of the frame.
    pending_destroy: Vec<Entity>,

    /// Scene loads requested this frame, applied at the next frame boundary.
    pending_loads: VecDeque<(String, LoadMode)>,

    quit_requested: bool,

    shutting_down: bool,

    /// Marker to make World !Send. World must stay on the frame thread.
    _not_send: PhantomData<*mut ()>,
}

impl World {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            entities: Allocator::new(),
            objects: BTreeMap::new(),
            scenes: SceneManager::new(),
            singletons: Singletons::new(),
            input: Input::new(),
            time: Time::default(),
            pending_destroy: Vec::new(),
            pending_loads: VecDeque::new(),
            quit_requested: false,
            shutting_down: false,
            _not_send: PhantomData,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.mode == Mode::Play
    }

    #[inline]
    pub fn time(&self) -> &Time {
        &self.time
    }

    pub(crate) fn set_time(&mut self, time: Time) {
        self.time = time;
    }

    #[inline]
    pub fn input(&self) -> &Input {
        &self.input
    }

    #[inline]
    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    // ==================== Objects ====================

    /// Spawn an empty object in the active scene.
    pub fn spawn(&mut self, name: impl Into<String>) -> Entity {
        let entity = self.entities.alloc();
        let name = name.into();
        log::trace!("spawning '{name}' as {entity:?}");
        self.objects
            .insert(entity, Object::new(name, self.scenes.active()));
        entity
    }

    /// Spawn an empty object as a child of `parent`, at the parent's origin.
    pub fn spawn_child(&mut self, name: impl Into<String>, parent: Entity) -> Result<Entity> {
        let parent_scene = self.object(parent)?.scene;
        let child = self.spawn(name);
        self.attach(child, parent, parent_scene);
        Ok(child)
    }

    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.objects.contains_key(&entity)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.objects.get(&entity).map(|o| o.name.as_str())
    }

    pub fn set_name(&mut self, entity: Entity, name: impl Into<String>) -> Result<()> {
        self.object_mut(entity)?.name = name.into();
        Ok(())
    }

    /// First live object with the given name.
    pub fn find(&self, name: &str) -> Option<Entity> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(entity, _)| *entity)
    }

    /// Root objects of a scene.
    pub fn roots(&self, scene: SceneId) -> Vec<Entity> {
        self.objects
            .iter()
            .filter(|(_, o)| o.scene == scene && o.parent.is_none())
            .map(|(entity, _)| *entity)
            .collect()
    }

    pub fn set_active(&mut self, entity: Entity, active: bool) -> Result<()> {
        self.object_mut(entity)?.active = active;
        Ok(())
    }

    /// Active itself and every ancestor active.
    pub fn is_active_in_hierarchy(&self, entity: Entity) -> bool {
        let mut current = Some(entity);
        while let Some(e) = current {
            match self.objects.get(&e) {
                Some(object) if object.active => current = object.parent,
                _ => return false,
            }
        }
        true
    }

    fn object(&self, entity: Entity) -> Result<&Object> {
        self.objects.get(&entity).ok_or(Error::DeadEntity(entity))
    }

    fn object_mut(&mut self, entity: Entity) -> Result<&mut Object> {
        self.objects.get_mut(&entity).ok_or(Error::DeadEntity(entity))
    }

    /// `entity` and all its descendants, parents before children.
    fn subtree(&self, entity: Entity) -> Result<Vec<Entity>> {
        self.object(entity)?;
        let mut order = Vec::new();
        let mut stack = vec![entity];
        while let Some(next) = stack.pop() {
            order.push(next);
            if let Some(object) = self.objects.get(&next) {
                stack.extend(object.children.iter().rev().copied());
            }
        }
        Ok(order)
    }

    // ==================== Transforms ====================

    pub fn transform(&self, entity: Entity) -> Result<Transform> {
        Ok(self.object(entity)?.transform)
    }

    pub fn set_transform(&mut self, entity: Entity, transform: Transform) -> Result<()> {
        self.object_mut(entity)?.transform = transform;
        Ok(())
    }

    pub fn local_position(&self, entity: Entity) -> Result<Vec3> {
        Ok(self.object(entity)?.transform.position)
    }

    pub fn set_local_position(&mut self, entity: Entity, position: Vec3) -> Result<()> {
        self.object_mut(entity)?.transform.position = position;
        Ok(())
    }

    pub fn set_local_rotation(&mut self, entity: Entity, rotation: Quat) -> Result<()> {
        self.object_mut(entity)?.transform.rotation = rotation;
        Ok(())
    }

    /// Local-to-world matrix including every ancestor.
    pub fn world_matrix(&self, entity: Entity) -> Result<Mat4> {
        let object = self.object(entity)?;
        let local = object.transform.matrix();
        match object.parent {
            Some(parent) => Ok(self.world_matrix(parent)? * local),
            None => Ok(local),
        }
    }

    pub fn world_position(&self, entity: Entity) -> Result<Vec3> {
        Ok(self.world_matrix(entity)?.transform_point3(Vec3::ZERO))
    }

    pub fn world_rotation(&self, entity: Entity) -> Result<Quat> {
        Ok(Transform::from_matrix(self.world_matrix(entity)?).rotation)
    }

    /// World-space +Z axis of the object.
    pub fn forward(&self, entity: Entity) -> Result<Vec3> {
        Ok((self.world_rotation(entity)? * Vec3::Z).normalize_or_zero())
    }

    /// Place the object at a world position and rotation, keeping its world scale.
    pub fn set_world_position_rotation(
        &mut self,
        entity: Entity,
        position: Vec3,
        rotation: Quat,
    ) -> Result<()> {
        let scale = Transform::from_matrix(self.world_matrix(entity)?).scale;
        let world = Mat4::from_scale_rotation_translation(scale, rotation, position);
        let parent = self.parent_matrix(entity)?;
        self.object_mut(entity)?.transform = Transform::relative_to(world, parent);
        Ok(())
    }

    fn parent_matrix(&self, entity: Entity) -> Result<Mat4> {
        match self.object(entity)?.parent {
            Some(parent) => self.world_matrix(parent),
            None => Ok(Mat4::IDENTITY),
        }
    }

    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.objects.get(&entity).and_then(|o| o.parent)
    }

    pub fn children(&self, entity: Entity) -> &[Entity] {
        self.objects
            .get(&entity)
            .map_or(&[], |o| o.children.as_slice())
    }

    /// Re-parent `child`, keeping its world position, rotation and scale. `None` moves it to the
    /// root of its scene. Children take the scene of their new parent.
    pub fn set_parent(&mut self, child: Entity, parent: Option<Entity>) -> Result<()> {
        let world = self.world_matrix(child)?;
        let child_scene = self.object(child)?.scene;

        let (parent_matrix, scene) = match parent {
            Some(parent) => {
                let parent_scene = self.object(parent)?.scene;
                if self.subtree(child)?.contains(&parent) {
                    return Err(Error::InvalidArgument(format!(
                        "cannot parent {child:?} under its own descendant {parent:?}"
                    )));
                }
                if child_scene.is_persistent() && !parent_scene.is_persistent() {
                    return Err(Error::PersistentReparent(child));
                }
                (self.world_matrix(parent)?, parent_scene)
            }
            None => (Mat4::IDENTITY, child_scene),
        };

        self.detach(child);
        if let Some(parent) = parent {
            self.attach(child, parent, scene);
        }
        self.object_mut(child)?.transform = Transform::relative_to(world, parent_matrix);
        Ok(())
    }

    fn detach(&mut self, child: Entity) {
        let Some(parent) = self.objects.get_mut(&child).and_then(|o| o.parent.take()) else {
            return;
        };
        if let Some(parent) = self.objects.get_mut(&parent) {
            parent.children.retain(|c| *c != child);
        }
    }

    fn attach(&mut self, child: Entity, parent: Entity, scene: SceneId) {
        if let Some(object) = self.objects.get_mut(&child) {
            object.parent = Some(parent);
        }
        if let Some(object) = self.objects.get_mut(&parent) {
            object.children.push(child);
        }
        self.move_to_scene(child, scene);
    }

    fn move_to_scene(&mut self, entity: Entity, scene: SceneId) {
        for e in self.subtree(entity).unwrap_or_default() {
            if let Some(object) = self.objects.get_mut(&e) {
                object.scene = scene;
            }
        }
    }

    // ==================== Components ====================

    /// Attach a component. While playing its `awake` hook runs before this returns.
    pub fn add_component<C: Component>(&mut self, entity: Entity, component: C) -> Result<ComponentId> {
        let object = self.object_mut(entity)?;
        object.components.push(ComponentSlot::new(Box::new(component)));
        let id = ComponentId {
            entity,
            index: object.components.len() - 1,
        };
        if self.is_playing() {
            self.invoke(id, |c, ctx| c.awake(ctx))?;
        }
        Ok(id)
    }

    /// Remove a component. A component removed from inside its own hook is dropped once the hook
    /// returns. Returns `false` if there was nothing to remove.
    pub fn remove_component(&mut self, id: ComponentId) -> bool {
        match self
            .objects
            .get_mut(&id.entity)
            .and_then(|o| o.components.get_mut(id.index))
        {
            Some(slot) if !slot.removed => {
                slot.removed = true;
                slot.value = None;
                true
            }
            _ => false,
        }
    }

    pub fn set_component_enabled(&mut self, id: ComponentId, enabled: bool) -> bool {
        match self
            .objects
            .get_mut(&id.entity)
            .and_then(|o| o.components.get_mut(id.index))
        {
            Some(slot) if !slot.removed => {
                slot.enabled = enabled;
                true
            }
            _ => false,
        }
    }

    pub fn is_component_enabled(&self, id: ComponentId) -> bool {
        self.objects
            .get(&id.entity)
            .and_then(|o| o.components.get(id.index))
            .is_some_and(|slot| slot.enabled && !slot.removed)
    }

    /// The first component of type `C` on the object.
    pub fn get_component<C: Component>(&self, entity: Entity) -> Option<&C> {
        self.objects
            .get(&entity)?
            .components
            .iter()
            .filter(|slot| !slot.removed)
            .find_map(|slot| slot.value.as_ref()?.as_any().downcast_ref::<C>())
    }

    pub fn get_component_mut<C: Component>(&mut self, entity: Entity) -> Option<&mut C> {
        self.objects
            .get_mut(&entity)?
            .components
            .iter_mut()
            .filter(|slot| !slot.removed)
            .find_map(|slot| slot.value.as_mut()?.as_any_mut().downcast_mut::<C>())
    }

    pub fn has_component<C: Component>(&self, entity: Entity) -> bool {
        self.get_component::<C>(entity).is_some()
    }

    pub fn component_id<C: Component>(&self, entity: Entity) -> Option<ComponentId> {
        self.objects
            .get(&entity)?
            .components
            .iter()
            .position(|slot| !slot.removed && slot.value.as_ref().is_some_and(|v| v.as_any().is::<C>()))
            .map(|index| ComponentId { entity, index })
    }

    pub fn component<C: Component>(&self, id: ComponentId) -> Option<&C> {
        let slot = self.objects.get(&id.entity)?.components.get(id.index)?;
        if slot.removed {
            return None;
        }
        slot.value.as_ref()?.as_any().downcast_ref::<C>()
    }

    pub fn component_mut<C: Component>(&mut self, id: ComponentId) -> Option<&mut C> {
        let slot = self.objects.get_mut(&id.entity)?.components.get_mut(id.index)?;
        if slot.removed {
            return None;
        }
        slot.value.as_mut()?.as_any_mut().downcast_mut::<C>()
    }

    /// Every live component of type `C`, in object order.
    pub fn find_objects_by_type<C: Component>(&self) -> Vec<ComponentId> {
        self.objects
            .iter()
            .flat_map(|(entity, object)| {
                object
                    .components
                    .iter()
                    .enumerate()
                    .filter(|(_, slot)| {
                        !slot.removed && slot.value.as_ref().is_some_and(|v| v.as_any().is::<C>())
                    })
                    .map(|(index, _)| ComponentId {
                        entity: *entity,
                        index,
                    })
            })
            .collect()
    }

    pub fn find_any_object_by_type<C: Component>(&self) -> Option<ComponentId> {
        self.find_objects_by_type::<C>().into_iter().next()
    }

    /// Run `hook` on a component with the component taken out of the world for the duration.
    pub(crate) fn invoke<F>(&mut self, id: ComponentId, hook: F) -> Result<()>
    where
        F: FnOnce(&mut dyn Component, &mut Context<'_>) -> Result<()>,
    {
        let Some(mut component) = self.take_component(id) else {
            return Ok(());
        };
        let result = hook(component.as_mut(), &mut Context::new(self, id));
        let restored = self.restore_component(id, component);
        result.and(restored)
    }

    fn take_component(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        let slot = self
            .objects
            .get_mut(&id.entity)?
            .components
            .get_mut(id.index)?;
        if slot.removed {
            return None;
        }
        slot.value.take()
    }

    fn restore_component(&mut self, id: ComponentId, mut component: Box<dyn Component>) -> Result<()> {
        let playing = self.is_playing();
        match self
            .objects
            .get_mut(&id.entity)
            .and_then(|o| o.components.get_mut(id.index))
        {
            Some(slot) if !slot.removed => {
                slot.value = Some(component);
                Ok(())
            }
            Some(_) => Ok(()),
            // The object was destroyed while the hook ran.
            None if playing => component.on_destroy(&mut Context::new(self, id)),
            None => Ok(()),
        }
    }

    /// Deliver an impact to the first impact responder on `target`. Returns whether one
    /// responded.
    pub fn send_impact(&mut self, target: Entity, source: Entity) -> Result<bool> {
        let count = self.object(target)?.components.len();
        for index in 0..count {
            let mut responded = false;
            self.invoke(ComponentId { entity: target, index }, |component, ctx| {
                match component.impact_responder() {
                    Some(responder) => {
                        responded = true;
                        responder.impact(ctx, source)
                    }
                    None => Ok(()),
                }
            })?;
            if responded {
                return Ok(true);
            }
        }
        Ok(false)
    }

    // ==================== Lifecycle ====================

    fn runnable(&self, started: Option<bool>) -> Vec<ComponentId> {
        self.objects
            .iter()
            .filter(|(entity, _)| self.is_active_in_hierarchy(**entity))
            .flat_map(|(entity, object)| {
                object
                    .components
                    .iter()
                    .enumerate()
                    .filter(move |(_, slot)| {
                        slot.is_runnable() && started.is_none_or(|s| slot.started == s)
                    })
                    .map(|(index, _)| ComponentId {
                        entity: *entity,
                        index,
                    })
            })
            .collect()
    }

    /// Run `start` on every component that has not started yet.
    pub(crate) fn run_start(&mut self) -> Result<()> {
        if !self.is_playing() {
            return Ok(());
        }
        for id in self.runnable(Some(false)) {
            if let Some(slot) = self
                .objects
                .get_mut(&id.entity)
                .and_then(|o| o.components.get_mut(id.index))
            {
                slot.started = true;
            }
            self.invoke(id, |c, ctx| c.start(ctx))?;
        }
        Ok(())
    }

    pub(crate) fn run_fixed_update(&mut self) -> Result<()> {
        if !self.is_playing() {
            return Ok(());
        }
        for id in self.runnable(Some(true)) {
            self.invoke(id, |c, ctx| c.fixed_update(ctx))?;
        }
        Ok(())
    }

    pub(crate) fn run_update(&mut self) -> Result<()> {
        if !self.is_playing() {
            return Ok(());
        }
        for id in self.runnable(Some(true)) {
            self.invoke(id, |c, ctx| c.update(ctx))?;
        }
        Ok(())
    }

    /// Work done after the update phase: deferred destruction and input reset.
    pub(crate) fn end_frame(&mut self) -> Result<()> {
        let flushed = self.flush_destroyed();
        self.input.end_frame();
        flushed
    }

    // ==================== Destruction ====================

    /// Destroy the object and its children at the end of the frame.
    pub fn destroy(&mut self, entity: Entity) -> Result<()> {
        if !self.is_playing() {
            return Err(Error::DestroyInEditMode);
        }
        self.object(entity)?;
        if !self.pending_destroy.contains(&entity) {
            self.pending_destroy.push(entity);
        }
        Ok(())
    }

    pub fn is_pending_destroy(&self, entity: Entity) -> bool {
        self.pending_destroy.contains(&entity)
    }

    /// Destroy every object queued with [`destroy`](Self::destroy).
    pub fn flush_destroyed(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending_destroy);
        for entity in pending {
            if self.is_alive(entity) {
                self.destroy_immediate(entity)?;
            }
        }
        Ok(())
    }

    /// Destroy the object and its children now. Fails without destroying anything if the subtree
    /// hosts a singleton outside the shutdown window.
    pub fn destroy_immediate(&mut self, entity: Entity) -> Result<()> {
        let subtree = self.subtree(entity)?;
        self.singletons.check_release(&subtree)?;

        self.detach(entity);
        let mut first_error = None;
        for e in subtree {
            let Some(object) = self.objects.remove(&e) else {
                continue;
            };
            log::trace!("destroying '{}' ({e:?})", object.name);
            for (index, slot) in object.components.into_iter().enumerate() {
                if slot.removed || !self.is_playing() {
                    continue;
                }
                if let Some(mut component) = slot.value {
                    let id = ComponentId { entity: e, index };
                    if let Err(err) = component.on_destroy(&mut Context::new(self, id)) {
                        first_error.get_or_insert(err);
                    }
                }
            }
            if let Err(err) = self.singletons.release_hosted(e) {
                first_error.get_or_insert(err);
            }
            self.pending_destroy.retain(|p| *p != e);
            self.entities.free(e);
        }
        first_error.map_or(Ok(()), Err)
    }

    // ==================== Persistence ====================

    /// Move the object to the root of the persistent scene, exempting it and its children from
    /// scene unloads. There is no way back.
    pub fn make_persistent(&mut self, entity: Entity) -> Result<()> {
        if self.object(entity)?.parent.is_some() {
            self.set_parent(entity, None)?;
        }
        self.move_to_scene(entity, SceneId::PERSISTENT);
        log::debug!("'{}' is now persistent", self.name(entity).unwrap_or_default());
        Ok(())
    }

    pub fn is_persistent(&self, entity: Entity) -> bool {
        self.objects
            .get(&entity)
            .is_some_and(|o| o.scene.is_persistent())
    }

    // ==================== Scenes ====================

    pub fn catalog(&self) -> &SceneCatalog {
        &self.scenes.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut SceneCatalog {
        &mut self.scenes.catalog
    }

    pub fn register_scene(
        &mut self,
        name: impl Into<String>,
        builder: impl Fn(&mut World) -> Result<()> + 'static,
    ) -> &mut Self {
        self.scenes.catalog.register(name, builder);
        self
    }

    pub fn active_scene(&self) -> SceneId {
        self.scenes.active()
    }

    pub fn active_scene_name(&self) -> Option<&str> {
        self.scenes
            .info(self.scenes.active())
            .map(|info| info.name.as_str())
    }

    pub fn set_active_scene(&mut self, scene: SceneId) -> bool {
        self.scenes.set_active(scene)
    }

    /// Loaded scenes, excluding the persistent one, oldest first.
    pub fn loaded_scenes(&self) -> Vec<SceneInfo> {
        self.scenes.loaded().cloned().collect()
    }

    pub fn find_scene(&self, name: &str) -> Option<SceneId> {
        self.scenes.find(name)
    }

    pub fn scene_of(&self, entity: Entity) -> Option<SceneId> {
        self.objects.get(&entity).map(|o| o.scene)
    }

    /// Request a scene load. It is applied at the next frame boundary.
    pub fn load_scene(&mut self, name: &str, mode: LoadMode) -> Result<()> {
        if !self.scenes.catalog.contains(name) {
            return Err(Error::UnknownScene(name.to_string()));
        }
        self.pending_loads.push_back((name.to_string(), mode));
        Ok(())
    }

    pub fn has_pending_loads(&self) -> bool {
        !self.pending_loads.is_empty()
    }

    pub(crate) fn apply_pending_loads(&mut self) -> Result<()> {
        while let Some((name, mode)) = self.pending_loads.pop_front() {
            self.load_scene_now(&name, mode)?;
        }
        Ok(())
    }

    /// Load a scene immediately. `Single` makes the new scene active, `Additive` leaves the active
    /// scene alone unless only the persistent scene was active.
    pub fn load_scene_now(&mut self, name: &str, mode: LoadMode) -> Result<SceneId> {
        let builder = self.scenes.catalog.builder(name)?;
        if mode == LoadMode::Single {
            let loaded: Vec<SceneId> = self.scenes.loaded().map(|s| s.id).collect();
            for scene in loaded {
                self.unload_scene(scene)?;
            }
        }

        let previous = self.scenes.active();
        let id = self.scenes.open(name);
        self.scenes.set_active(id);
        log::info!("loading scene '{name}' ({mode:?})");
        builder(self)?;

        if mode == LoadMode::Additive && !previous.is_persistent() {
            self.scenes.set_active(previous);
        }
        Ok(id)
    }

    /// Destroy every object of a scene and forget the scene.
    pub fn unload_scene(&mut self, scene: SceneId) -> Result<()> {
        if scene.is_persistent() {
            return Err(Error::InvalidArgument(
                "the persistent scene cannot be unloaded".into(),
            ));
        }
        for root in self.roots(scene) {
            if self.is_alive(root) {
                self.destroy_immediate(root)?;
            }
        }
        self.scenes.close(scene);
        Ok(())
    }

    /// Replace whatever is loaded with the boot scenes: every auto-load scene additively, in
    /// order, then the first scene, which becomes active.
    pub fn boot(&mut self, auto_load: &AutoLoadScenes, first_scene: Option<&str>) -> Result<()> {
        let loaded: Vec<SceneId> = self.scenes.loaded().map(|s| s.id).collect();
        for scene in loaded {
            self.unload_scene(scene)?;
        }
        for scene in auto_load.additive_scenes() {
            if let Some(name) = scene.scene_name() {
                self.load_scene_now(name, LoadMode::Additive)?;
            }
        }
        if let Some(first) = first_scene {
            let id = self.load_scene_now(first, LoadMode::Additive)?;
            self.scenes.set_active(id);
        }
        Ok(())
    }

    /// Spawn a prefab at a world position and rotation, optionally under a parent.
    pub fn instantiate(
        &mut self,
        prefab: &Prefab,
        position: Vec3,
        rotation: Quat,
        parent: Option<Entity>,
    ) -> Result<Entity> {
        let entity = self.spawn(format!("{} (Clone)", prefab.name()));
        if let Some(parent) = parent {
            let scene = self.object(parent)?.scene;
            self.attach(entity, parent, scene);
        }
        self.set_world_position_rotation(entity, position, rotation)?;
        prefab.build(self, entity)?;
        Ok(entity)
    }

    // ==================== Singletons ====================

    pub fn singletons(&self) -> &Singletons {
        &self.singletons
    }

    /// The singleton instance of `T`, constructed on first access on a new persistent host
    /// object named `"<Type> (Auto-Created)"`.
    pub fn singleton<T: Singleton>(&mut self) -> Result<&mut T> {
        if !self.singletons.is_assigned::<T>() {
            let host = self.spawn(format!("{} (Auto-Created)", short_type_name::<T>()));
            self.make_persistent(host)?;
            // Reserve before constructing: `create` may look the slot up again.
            self.singletons.reserve::<T>(host)?;
            match T::create(self, host) {
                Ok(instance) => {
                    self.singletons.complete(instance);
                    log::debug!("auto-created singleton {}", type_name::<T>());
                }
                Err(err) => {
                    self.singletons.cancel::<T>();
                    if self.is_alive(host) {
                        if let Err(cleanup) = self.destroy_immediate(host) {
                            log::warn!("failed to remove singleton host: {cleanup}");
                        }
                    }
                    return Err(err);
                }
            }
        }
        self.singletons
            .get_mut::<T>()
            .ok_or(Error::SingletonUnderConstruction {
                type_name: type_name::<T>(),
            })
    }

    /// Register a caller-constructed instance of `T` hosted by `host`. The host becomes
    /// persistent.
    pub fn bind_singleton<T: 'static>(&mut self, host: Entity, instance: T) -> Result<&mut T> {
        self.object(host)?;
        if self.singletons.is_assigned::<T>() {
            return Err(Error::AlreadyBound {
                type_name: type_name::<T>(),
            });
        }
        self.make_persistent(host)?;
        self.singletons.bind(host, instance)
    }

    pub fn try_singleton<T: 'static>(&self) -> Option<&T> {
        self.singletons.get::<T>()
    }

    pub fn try_singleton_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.singletons.get_mut::<T>()
    }

    pub fn has_singleton<T: 'static>(&self) -> bool {
        self.singletons.is_assigned::<T>()
    }

    /// Release the singleton of `T` and destroy its host. Only legal after
    /// [`notify_shutdown`](Self::notify_shutdown).
    pub fn teardown_singleton<T: 'static>(&mut self) -> Result<Option<T>> {
        let (instance, host) = self.singletons.teardown::<T>()?;
        if let Some(host) = host.filter(|h| self.is_alive(*h)) {
            self.destroy_immediate(host)?;
        }
        Ok(instance)
    }

    // ==================== Shutdown ====================

    pub fn request_quit(&mut self) {
        if !self.quit_requested {
            log::info!("quit requested");
        }
        self.quit_requested = true;
    }

    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down
    }

    /// Signal application shutdown: every singleton enters its shutdown window and, the first
    /// time, every component gets `on_application_quit`.
    pub fn notify_shutdown(&mut self) -> Result<()> {
        self.singletons.notify_shutdown();
        if self.shutting_down {
            return Ok(());
        }
        self.shutting_down = true;
        if self.is_playing() {
            for id in self.runnable(None) {
                self.invoke(id, |c, ctx| c.on_application_quit(ctx))?;
            }
        }
        Ok(())
    }

    /// Shut down and destroy every object, persistent ones included.
    pub fn shutdown(&mut self) -> Result<()> {
        self.notify_shutdown()?;
        self.pending_destroy.clear();
        self.pending_loads.clear();
        let mut first_error = None;
        // `on_destroy` hooks may spawn objects (singleton hosts among them), so sweep until a
        // pass destroys nothing.
        loop {
            let roots: Vec<Entity> = self
                .objects
                .iter()
                .filter(|(_, o)| o.parent.is_none())
                .map(|(e, _)| *e)
                .collect();
            let mut destroyed_any = false;
            for root in roots {
                if !self.is_alive(root) {
                    continue;
                }
                match self.destroy_immediate(root) {
                    Ok(()) => destroyed_any = true,
                    Err(err) => {
                        first_error.get_or_insert(err);
                    }
                }
            }
            if !destroyed_any {
                break;
            }
        }
        log::info!("world shut down");
        first_error.map_or(Ok(()), Err)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Mode::Play)
    }
}

/// `my_game::audio::Mixer<f32>` -> `Mixer`
fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
