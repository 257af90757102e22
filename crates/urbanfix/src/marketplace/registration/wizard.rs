use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::store::SessionStore;

use super::domain::{BasicInfo, RegistrationState, ServiceDraft};
use super::RegistrationError;

/// Storage key for the persisted wizard snapshot.
pub const STORAGE_KEY: &str = "urbanfix_partner_registration_state";

const FIRST_STEP: u8 = 1;
const LAST_STEP: u8 = 3;

/// Three-step partner signup wizard.
///
/// Every mutation persists the whole snapshot under [`STORAGE_KEY`] so an
/// interrupted signup resumes where it left off. An unreadable or missing
/// snapshot degrades to the initial state; only [`reset`](Self::reset)
/// wipes storage.
pub struct RegistrationWizard<P> {
    store: Arc<P>,
    state: Mutex<RegistrationState>,
}

impl<P> RegistrationWizard<P>
where
    P: SessionStore + 'static,
{
    pub fn new(store: Arc<P>) -> Self {
        let state = Self::load_initial(&store);
        Self {
            store,
            state: Mutex::new(state),
        }
    }

    fn load_initial(store: &Arc<P>) -> RegistrationState {
        let raw = match store.get(STORAGE_KEY) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(%error, "wizard snapshot unreadable, starting fresh");
                return RegistrationState::default();
            }
        };
        match raw {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|error| {
                warn!(%error, "wizard snapshot corrupt, starting fresh");
                RegistrationState::default()
            }),
            None => RegistrationState::default(),
        }
    }

    pub fn snapshot(&self) -> RegistrationState {
        self.state.lock().expect("wizard state mutex poisoned").clone()
    }

    /// Jump to a step, clamped into the wizard's range.
    pub fn set_step(&self, step: u8) -> Result<(), RegistrationError> {
        self.mutate(|state| {
            state.current_step = step.clamp(FIRST_STEP, LAST_STEP);
        })
    }

    pub fn next_step(&self) -> Result<(), RegistrationError> {
        let current = self.snapshot().current_step;
        self.set_step(current.saturating_add(1))
    }

    pub fn prev_step(&self) -> Result<(), RegistrationError> {
        let current = self.snapshot().current_step;
        self.set_step(current.saturating_sub(1))
    }

    /// Store validated step-one data.
    pub fn set_basic_info(&self, info: BasicInfo) -> Result<(), RegistrationError> {
        info.validate()?;
        self.mutate(|state| {
            state.basic_info = Some(info);
        })
    }

    /// Replace the category selection.
    ///
    /// Duplicates collapse (first occurrence wins), newly selected
    /// categories get an empty draft list, and drafts for categories no
    /// longer selected are dropped.
    pub fn set_selected_categories(
        &self,
        category_ids: Vec<String>,
    ) -> Result<(), RegistrationError> {
        self.mutate(|state| {
            let mut unique: Vec<String> = Vec::with_capacity(category_ids.len());
            for id in category_ids {
                if !unique.contains(&id) {
                    unique.push(id);
                }
            }

            let mut drafts = BTreeMap::new();
            for id in &unique {
                let existing = state
                    .services_by_category
                    .remove(id)
                    .unwrap_or_default();
                drafts.insert(id.clone(), existing);
            }

            state.selected_category_ids = unique;
            state.services_by_category = drafts;
        })
    }

    pub fn add_service_draft(
        &self,
        category_id: &str,
        draft: ServiceDraft,
    ) -> Result<(), RegistrationError> {
        self.mutate(|state| {
            state
                .services_by_category
                .entry(category_id.to_string())
                .or_default()
                .push(draft);
        })
    }

    /// Remove a draft by position. An out-of-range index or unknown
    /// category is a silent no-op.
    pub fn remove_service_draft(
        &self,
        category_id: &str,
        index: usize,
    ) -> Result<(), RegistrationError> {
        self.mutate(|state| {
            if let Some(drafts) = state.services_by_category.get_mut(category_id) {
                if index < drafts.len() {
                    drafts.remove(index);
                }
            }
        })
    }

    /// Whether the given step's gate is satisfied.
    pub fn can_advance(&self, step: u8) -> bool {
        let state = self.state.lock().expect("wizard state mutex poisoned");
        match step {
            1 => state.basic_info.is_some(),
            2 => !state.selected_category_ids.is_empty(),
            3 => state.selected_category_ids.iter().all(|id| {
                state
                    .services_by_category
                    .get(id)
                    .is_some_and(|drafts| !drafts.is_empty())
            }),
            _ => false,
        }
    }

    /// Back to a blank wizard, wiping the persisted snapshot.
    pub fn reset(&self) -> Result<(), RegistrationError> {
        {
            let mut state = self.state.lock().expect("wizard state mutex poisoned");
            *state = RegistrationState::default();
        }
        self.store.remove(STORAGE_KEY)?;
        Ok(())
    }

    fn mutate(
        &self,
        apply: impl FnOnce(&mut RegistrationState),
    ) -> Result<(), RegistrationError> {
        let snapshot = {
            let mut state = self.state.lock().expect("wizard state mutex poisoned");
            apply(&mut state);
            state.clone()
        };
        let serialized = serde_json::to_string(&snapshot).map_err(|error| {
            RegistrationError::Validation(format!("snapshot serialization: {error}"))
        })?;
        self.store.set(STORAGE_KEY, serialized)?;
        Ok(())
    }
}
