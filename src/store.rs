// Viewer store
// Single owner of the session, its mounted scene and all live configuration.
// Every UI command and query goes through here.

use crate::animation;
use crate::error::{AdapterError, IngestError};
use crate::export::{self, ExportLanguage};
use crate::expression;
use crate::ingest::{AssetSource, IngestAdapter, IngestOutput};
use crate::model::{ModelSession, SessionId, build_session, ingest_model, validate_source};
use crate::scene::SceneMount;
use crate::settings::{SceneSettings, SceneSettingsUpdate};
use crate::transform::{Axis, TransformComponent, TransformConfig};
use std::collections::BTreeSet;
use std::rc::Rc;

/// Proof that a load was started. Completing with a ticket that is no longer
/// current does nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    id: SessionId,
    display_name: String,
}

impl LoadTicket {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

#[derive(Default)]
pub struct ViewerStore {
    session: Option<ModelSession>,
    mount: Option<SceneMount>,
    transform: TransformConfig,
    scene_settings: SceneSettings,
    pending_load: Option<SessionId>,
    last_error: Option<String>,
    last_id: u64,
}

impl ViewerStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- queries ----

    pub fn session(&self) -> Option<&ModelSession> {
        self.session.as_ref()
    }

    pub fn transform_config(&self) -> &TransformConfig {
        &self.transform
    }

    pub fn scene_settings(&self) -> &SceneSettings {
        &self.scene_settings
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn mount(&self) -> Option<&SceneMount> {
        self.mount.as_ref()
    }

    // ---- loading ----

    /// Validate `source` and start a load. Returns `None` (and records an error)
    /// when the file type is rejected; no adapter work may happen in that case.
    pub fn begin_load(&mut self, source: &AssetSource) -> Option<LoadTicket> {
        if let Err(err) = validate_source(source) {
            log::warn!("Rejected '{}': {}", source.file_name(), err);
            self.last_error = Some(err.user_message());
            return None;
        }

        self.last_id += 1;
        let id = SessionId::new(self.last_id);
        if let Some(previous) = self.pending_load.replace(id) {
            log::debug!("Load {previous} superseded by {id}");
        }
        self.last_error = None;

        log::info!("Loading '{}' as {}", source.display_name(), id);
        Some(LoadTicket {
            id,
            display_name: source.display_name(),
        })
    }

    /// Finish the load started with `ticket`. Stale tickets are ignored.
    /// Returns true when a new session was installed.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<IngestOutput, AdapterError>,
    ) -> bool {
        if self.is_stale(&ticket) {
            return false;
        }
        let id = ticket.id;
        let display_name = ticket.display_name.clone();
        self.finish_load(
            ticket,
            result
                .map(|output| build_session(id, display_name, output))
                .map_err(IngestError::from),
        )
    }

    /// Validate, ingest through `adapter` and install the result.
    pub async fn load_asset<A: IngestAdapter>(&mut self, adapter: &A, source: AssetSource) -> bool {
        let Some(ticket) = self.begin_load(&source) else {
            return false;
        };
        let result = ingest_model(adapter, &source, ticket.id).await;
        self.finish_load(ticket, result)
    }

    fn is_stale(&self, ticket: &LoadTicket) -> bool {
        let stale = self.pending_load != Some(ticket.id);
        if stale {
            log::warn!("Dropping stale completion for {}", ticket.id);
        }
        stale
    }

    fn finish_load(&mut self, ticket: LoadTicket, result: Result<ModelSession, IngestError>) -> bool {
        if self.is_stale(&ticket) {
            return false;
        }
        self.pending_load = None;

        match result {
            Ok(session) => {
                self.install_session(session);
                true
            }
            Err(err) => {
                log::error!("Failed to load '{}': {}", ticket.display_name, err);
                self.drop_session();
                self.last_error = Some(err.user_message());
                false
            }
        }
    }

    /// Remove the model and cancel any load in flight.
    pub fn clear_model(&mut self) {
        if let Some(pending) = self.pending_load.take() {
            log::debug!("Cancelled pending load {pending}");
        }
        if let Some(session) = &self.session {
            log::info!("Cleared model '{}'", session.display_name());
        }
        self.drop_session();
        self.last_error = None;
    }

    fn install_session(&mut self, mut session: ModelSession) {
        // Old players die with the old mount
        self.mount = None;
        self.transform.reset_for_new_model();
        expression::zero_scene(session.scene_root_mut());
        self.transform.apply_to_node(session.scene_root_mut());
        log::info!("Loaded {}", session.summary());
        self.session = Some(session);
        self.last_error = None;
    }

    fn drop_session(&mut self) {
        self.mount = None;
        self.session = None;
        self.transform.reset_for_new_model();
    }

    // ---- render side ----

    /// Create the clip players for the current session and bind them by name.
    /// Calling it again replaces every player. Returns the number of clips bound.
    pub fn mount_scene(&mut self) -> usize {
        let Some(session) = self.session.as_mut() else {
            log::debug!("mount_scene ignored: no model loaded");
            return 0;
        };

        let mount = SceneMount::new(session.id(), session.animation_clips());
        let names: BTreeSet<String> = session
            .animation_clips()
            .iter()
            .map(|clip| clip.name.clone())
            .collect();

        let mut bound = 0;
        for name in &names {
            if let Some(action) = mount.action(name) {
                bound += animation::bind_runtime_handle(
                    session.animation_clips_mut(),
                    name,
                    &Rc::downgrade(action),
                );
            }
        }

        log::debug!("Mounted {} with {} player(s)", session.id(), mount.actions().len());
        self.mount = Some(mount);
        bound
    }

    /// One render frame: advance players, recompute the model root transform and
    /// re-apply every stored morph influence. Runs on every call while a model is loaded.
    pub fn tick(&mut self, dt: f32) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(mount) = self.mount.as_mut() {
            mount.update(dt);
        }
        let root = session.scene_root_mut();
        self.transform.apply_to_node(root);
        expression::apply_to_scene(root, &self.transform.morph_influences);
    }

    // ---- animation commands ----

    pub fn toggle_animation(&mut self, name: &str, play: Option<bool>) -> Option<bool> {
        let session = self.session.as_mut()?;
        let state = animation::toggle(session.animation_clips_mut(), name, play);
        if state.is_none() {
            log::debug!("toggle_animation: no clip named '{name}'");
        }
        state
    }

    pub fn set_animation_speed(&mut self, name: &str, multiplier: f32) -> bool {
        match self.session.as_mut() {
            Some(session) => animation::set_speed(session.animation_clips_mut(), name, multiplier),
            None => false,
        }
    }

    pub fn reset_all_animations(&mut self) {
        if let Some(session) = self.session.as_mut() {
            animation::reset_all(session.animation_clips_mut());
        }
    }

    // ---- expression commands ----

    /// Store an influence for a morph target of the current model.
    /// Names the model does not have are rejected.
    pub fn set_morph_influence(&mut self, name: &str, value: f32) -> bool {
        match &self.session {
            Some(session) if session.has_morph_target(name) => {
                expression::set_influence(&mut self.transform.morph_influences, name, value);
                true
            }
            Some(_) => {
                log::warn!("set_morph_influence: unknown morph target '{name}'");
                false
            }
            None => false,
        }
    }

    pub fn reset_morph_targets(&mut self) {
        expression::reset_all(&mut self.transform.morph_influences);
        if let Some(session) = self.session.as_mut() {
            expression::zero_scene(session.scene_root_mut());
        }
    }

    // ---- placement and presentation ----

    pub fn set_transform_component(&mut self, which: TransformComponent, axis: Axis, value: f32) {
        self.transform.set_component(which, axis, value);
        self.apply_transform();
    }

    pub fn reset_transforms(&mut self) {
        self.transform.reset_transforms();
        self.apply_transform();
    }

    fn apply_transform(&mut self) {
        if let Some(session) = self.session.as_mut() {
            self.transform.apply_to_node(session.scene_root_mut());
        }
    }

    pub fn update_scene_settings(&mut self, update: SceneSettingsUpdate) {
        self.scene_settings.apply(update);
    }

    // ---- export ----

    /// `None` while no model is loaded.
    pub fn export_data_artifact(&self, language: ExportLanguage) -> Option<String> {
        let session = self.session.as_ref()?;
        Some(export::generate_data_artifact(session, &self.transform, language))
    }

    /// `None` while no model is loaded.
    pub fn export_integration_artifact(&self, language: ExportLanguage) -> Option<String> {
        let session = self.session.as_ref()?;
        Some(export::generate_integration_artifact(session, &self.transform, language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ClipInfo;
    use crate::scene::{MorphTable, SceneNode};

    fn robot() -> IngestOutput {
        IngestOutput {
            scene_root: SceneNode::group("Scene")
                .with_child(SceneNode::morph_mesh("Face", MorphTable::new(["Smile", "Frown"]))),
            clips: vec![ClipInfo::new("Idle", 1.0), ClipInfo::new("Run", 2.0)],
        }
    }

    fn loaded_store() -> ViewerStore {
        let mut store = ViewerStore::new();
        let ticket = store
            .begin_load(&AssetSource::file("robot.glb", Vec::new()))
            .unwrap();
        assert!(store.complete_load(ticket, Ok(robot())));
        store
    }

    fn face_influence(store: &ViewerStore, channel: &str) -> Option<f32> {
        store
            .session()?
            .scene_root()
            .find("Face")?
            .morph_table()?
            .influence(channel)
    }

    #[test]
    fn loading_flag_follows_ticket() {
        let mut store = ViewerStore::new();
        let ticket = store
            .begin_load(&AssetSource::file("robot.glb", Vec::new()))
            .unwrap();
        assert!(store.is_loading());
        assert!(store.session().is_none());
        store.complete_load(ticket, Ok(robot()));
        assert!(!store.is_loading());
        assert_eq!(store.session().unwrap().display_name(), "robot");
    }

    #[test]
    fn rejected_file_type_sets_error() {
        let mut store = ViewerStore::new();
        assert!(store.begin_load(&AssetSource::file("robot.fbx", Vec::new())).is_none());
        assert!(!store.is_loading());
        assert_eq!(
            store.last_error(),
            Some("Invalid file type. Please upload a .glb or .gltf file.")
        );
    }

    #[test]
    fn failed_load_degrades_to_no_model() {
        let mut store = loaded_store();
        let ticket = store
            .begin_load(&AssetSource::file("broken.glb", Vec::new()))
            .unwrap();
        assert!(store.session().is_some());
        assert!(!store.complete_load(ticket, Err(AdapterError::Decode("bad chunk".to_string()))));
        assert!(store.session().is_none());
        assert!(!store.is_loading());
        assert_eq!(
            store.last_error(),
            Some("Failed to load model: decode error: bad chunk")
        );
    }

    #[test]
    fn clear_cancels_pending_load() {
        let mut store = loaded_store();
        let ticket = store
            .begin_load(&AssetSource::file("next.glb", Vec::new()))
            .unwrap();
        store.clear_model();
        assert!(!store.is_loading());
        assert!(!store.complete_load(ticket, Ok(robot())));
        assert!(store.session().is_none());
    }

    #[test]
    fn mount_binds_and_applies_prior_state() {
        let mut store = loaded_store();
        store.set_animation_speed("Run", 2.0);
        store.toggle_animation("Run", Some(true));
        assert_eq!(store.mount_scene(), 2);

        let mount = store.mount().unwrap();
        let run = mount.action("Run").unwrap().borrow();
        assert!(run.is_running());
        assert_eq!(run.time_scale(), 2.0);
        assert!(store.session().unwrap().animation_clips().iter().all(|c| c.is_bound()));
    }

    #[test]
    fn tick_advances_players_and_reapplies_influences() {
        let mut store = loaded_store();
        store.mount_scene();
        store.toggle_animation("Run", Some(true));
        assert!(store.set_morph_influence("Smile", 0.8));

        store.tick(0.5);
        assert_eq!(face_influence(&store, "Smile"), Some(0.8));
        assert_eq!(store.mount().unwrap().action("Run").unwrap().borrow().time, 0.5);

        // A remount of the mesh would reset its slots; the next tick restores them
        store.reset_morph_targets();
        assert_eq!(face_influence(&store, "Smile"), Some(0.0));
        assert!(store.set_morph_influence("Smile", 0.3));
        store.tick(0.0);
        assert_eq!(face_influence(&store, "Smile"), Some(0.3));
    }

    #[test]
    fn unknown_morph_target_is_rejected() {
        let mut store = loaded_store();
        assert!(!store.set_morph_influence("Sneer", 0.5));
        assert!(store.transform_config().morph_influences.is_empty());
        assert!(!ViewerStore::new().set_morph_influence("Smile", 0.5));
    }

    #[test]
    fn transform_changes_reach_model_root() {
        let mut store = loaded_store();
        store.set_transform_component(TransformComponent::Position, Axis::X, 4.0);
        let root = store.session().unwrap().scene_root();
        assert_eq!(root.local_transform[(0, 3)], 4.0);

        store.reset_transforms();
        let root = store.session().unwrap().scene_root();
        assert_eq!(root.local_transform[(0, 3)], 0.0);
    }

    #[test]
    fn export_requires_a_model() {
        let store = ViewerStore::new();
        assert!(store.export_data_artifact(ExportLanguage::TypeScript).is_none());
        assert!(store.export_integration_artifact(ExportLanguage::JavaScript).is_none());

        let store = loaded_store();
        assert!(store.export_data_artifact(ExportLanguage::TypeScript).is_some());
    }

    #[test]
    fn scene_settings_are_independent_of_models() {
        let mut store = loaded_store();
        store.update_scene_settings(SceneSettingsUpdate {
            show_grid: Some(false),
            ..Default::default()
        });
        store.clear_model();
        assert!(!store.scene_settings().show_grid);
        assert!(store.scene_settings().show_axes);
    }
}
