//! Application wiring.
//!
//! `HandyApp` owns every component and is the single entry point for host
//! events: the host translates each DOM event into a [`UiEvent`], hands it to
//! [`HandyApp::dispatch`] and suppresses the default action when asked to.

use crate::config::AppConfig;
use crate::dom::{DefaultAction, Dom};
use crate::navigation::NavigationController;
use crate::profile::Profile;
use crate::reorder::ReorderWidget;
use crate::schedule::Scheduler;
use crate::selection::{MultiSelect, SingleSelect};
use crate::storage::{KeyValueStore, LoadOutcome, ProfileStore};
use crate::HandyError;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// Blocking user acknowledgment.
pub trait Notifier {
    fn acknowledge(&self, message: &str);
}

/// Notifier that remembers every message.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn acknowledge(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_owned());
    }
}

/// A user interaction, tagged with the element it happened on.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent<N> {
    NavClick(N),
    HobbyClick(N),
    MoodClick(N),
    DragStart(N),
    DragOver(N),
    DragEnter(N),
    DragLeave(N),
    Drop(N),
    DragEnd(N),
    Save,
}

pub struct HandyApp<D, K, S, N>
where
    D: Dom,
{
    config: AppConfig,
    dom: D,
    store: ProfileStore<K>,
    scheduler: S,
    notifier: N,
    navigation: NavigationController<D>,
    hobbies: MultiSelect<D>,
    mood: SingleSelect<D>,
    life_areas: Option<ReorderWidget<D>>,
}

impl<D, K, S, N> HandyApp<D, K, S, N>
where
    D: Dom,
    K: KeyValueStore,
    S: Scheduler,
    N: Notifier,
{
    /// Build every component against the current document. The life-area
    /// widget is only created when its container exists.
    pub fn new(config: AppConfig, dom: D, store: K, scheduler: S, notifier: N) -> Self {
        let navigation = NavigationController::new(dom.clone(), &config);
        let hobbies = MultiSelect::new(dom.clone(), &config.hobby_selector, &config.selected_class);
        let mood = SingleSelect::new(dom.clone(), &config.mood_selector, &config.selected_class);
        let life_areas = dom
            .by_id(&config.life_areas_id)
            .map(|container| ReorderWidget::attach(dom.clone(), container, &config));
        let store = ProfileStore::with_key(store, &config.storage_key);

        Self {
            config,
            dom,
            store,
            scheduler,
            notifier,
            navigation,
            hobbies,
            mood,
            life_areas,
        }
    }

    /// Build the app and apply the stored profile, as on page load.
    pub fn bootstrap(config: AppConfig, dom: D, store: K, scheduler: S, notifier: N) -> Self {
        let mut app = Self::new(config, dom, store, scheduler, notifier);
        app.load();
        app
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn navigation(&self) -> &NavigationController<D> {
        &self.navigation
    }

    pub fn hobbies(&self) -> &MultiSelect<D> {
        &self.hobbies
    }

    pub fn mood(&self) -> &SingleSelect<D> {
        &self.mood
    }

    pub fn life_areas(&self) -> Option<&ReorderWidget<D>> {
        self.life_areas.as_ref()
    }

    pub fn store(&self) -> &ProfileStore<K> {
        &self.store
    }

    pub fn dispatch(&mut self, event: UiEvent<D::Node>) -> Result<DefaultAction, HandyError> {
        match event {
            UiEvent::NavClick(item) => {
                if let Some(page) = self.navigation.page_of(&item) {
                    self.navigation.navigate_to(&page);
                }
            }
            UiEvent::HobbyClick(item) => {
                self.hobbies.toggle(&item);
            }
            UiEvent::MoodClick(option) => self.mood.select(&option),
            UiEvent::DragStart(item) => {
                if let Some(widget) = self.life_areas.as_mut() {
                    widget.drag_start(&item, &self.scheduler);
                }
            }
            UiEvent::DragOver(item) => {
                if let Some(widget) = &self.life_areas {
                    return Ok(widget.drag_over(&item));
                }
            }
            UiEvent::DragEnter(item) => {
                if let Some(widget) = &self.life_areas {
                    return Ok(widget.drag_enter(&item));
                }
            }
            UiEvent::DragLeave(item) => {
                if let Some(widget) = &self.life_areas {
                    widget.drag_leave(&item);
                }
            }
            UiEvent::Drop(item) => {
                if let Some(widget) = self.life_areas.as_mut() {
                    widget.drop(&item);
                    return Ok(DefaultAction::Prevent);
                }
            }
            UiEvent::DragEnd(item) => {
                if let Some(widget) = self.life_areas.as_mut() {
                    widget.drag_end(&item);
                }
            }
            UiEvent::Save => {
                self.save()?;
            }
        }
        Ok(DefaultAction::Allow)
    }

    pub fn navigate_to(&mut self, page: &str) -> bool {
        self.navigation.navigate_to(page)
    }

    /// Gather the profile from the current document state.
    pub fn snapshot(&self) -> Profile {
        Profile {
            name: self.field_value(&self.config.name_field_id),
            job: self.field_value(&self.config.job_field_id),
            hobbies: self.hobbies.selected_labels(),
            life_areas: self
                .life_areas
                .as_ref()
                .map(ReorderWidget::labels)
                .unwrap_or_default(),
        }
    }

    /// Store the current profile, acknowledge, then go to the follow-up
    /// page. A failed write returns before either side effect.
    pub fn save(&mut self) -> Result<Profile, HandyError> {
        let profile = self.snapshot();
        self.store.save(&profile)?;
        self.notifier.acknowledge(&self.config.saved_message);
        let follow_up = self.config.follow_up_page.clone();
        self.navigation.navigate_to(&follow_up);
        Ok(profile)
    }

    /// Apply the stored profile, if any. Life-area order is left as in
    /// markup; only name, job and hobbies are restored.
    pub fn load(&mut self) -> LoadOutcome {
        let outcome = self.store.load();
        if let Some(profile) = outcome.profile() {
            self.set_field_value(&self.config.name_field_id, &profile.name);
            self.set_field_value(&self.config.job_field_id, &profile.job);
            self.hobbies.mark(&profile.hobbies);
            info!(name = %profile.name, "profile applied");
        } else {
            debug!("keeping markup defaults");
        }
        outcome
    }

    fn field_value(&self, id: &str) -> String {
        self.dom
            .by_id(id)
            .and_then(|field| self.dom.value(&field))
            .unwrap_or_default()
    }

    fn set_field_value(&self, id: &str, value: &str) {
        if let Some(field) = self.dom.by_id(id) {
            self.dom.set_value(&field, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{ElementSpec, MemoryDom, NodeId};
    use crate::schedule::TickQueue;
    use crate::storage::MemoryStore;

    type TestApp = HandyApp<MemoryDom, MemoryStore, TickQueue, RecordingNotifier>;

    fn page(dom: &MemoryDom) -> (NodeId, NodeId) {
        let profile = dom.append(
            dom.body(),
            ElementSpec::new("section").id("profile-page").class("page").class("active"),
        );
        dom.append(dom.body(), ElementSpec::new("section").id("goals-page").class("page"));
        let name = dom.append(profile, ElementSpec::new("input").id("name").value(""));
        let job = dom.append(profile, ElementSpec::new("input").id("job").value(""));
        (name, job)
    }

    fn app(dom: &MemoryDom, store: &MemoryStore, notifier: &RecordingNotifier) -> TestApp {
        HandyApp::new(
            AppConfig::default(),
            dom.clone(),
            store.clone(),
            TickQueue::new(),
            notifier.clone(),
        )
    }

    #[test]
    fn save_acknowledges_and_moves_to_goals() {
        let dom = MemoryDom::new();
        let (name, _) = page(&dom);
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let mut app = app(&dom, &store, &notifier);

        dom.set_value(&name, "Ada");
        let saved = app.save().unwrap();

        assert_eq!(saved.name, "Ada");
        assert_eq!(notifier.messages(), vec!["Profile saved successfully!"]);
        assert_eq!(app.navigation().active_page(), Some("goals"));
        assert!(store.get("handyUserData").is_some());
    }

    #[test]
    fn failed_save_has_no_side_effects() {
        let dom = MemoryDom::new();
        page(&dom);
        let store = MemoryStore::new();
        store.reject_writes(true);
        let notifier = RecordingNotifier::default();
        let mut app = app(&dom, &store, &notifier);

        assert!(app.dispatch(UiEvent::Save).is_err());
        assert!(notifier.messages().is_empty());
        assert_eq!(app.navigation().active_page(), Some("profile"));
    }

    #[test]
    fn missing_form_fields_read_as_empty() {
        let dom = MemoryDom::new();
        let store = MemoryStore::new();
        let app = app(&dom, &store, &RecordingNotifier::default());

        let profile = app.snapshot();
        assert!(profile.name.is_empty());
        assert!(profile.job.is_empty());
        assert!(profile.life_areas.is_empty());
        assert!(app.life_areas().is_none());
    }

    #[test]
    fn drag_events_without_widget_allow_default() {
        let dom = MemoryDom::new();
        let stray = dom.append(dom.body(), ElementSpec::new("div"));
        let store = MemoryStore::new();
        let mut app = app(&dom, &store, &RecordingNotifier::default());

        assert_eq!(app.dispatch(UiEvent::DragOver(stray)).unwrap(), DefaultAction::Allow);
        assert_eq!(app.dispatch(UiEvent::Drop(stray)).unwrap(), DefaultAction::Allow);
    }
}
