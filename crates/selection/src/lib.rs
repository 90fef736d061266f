//! Selection controller for the activity panel: ordered checkbox groups,
//! positional preset operations, and submit-time validation.

use catalog::domain::{ActivityId, BASIC_SPLIT};
use catalog::protocol::RunRequest;
use thiserror::Error;
use tracing::debug;

/// Name of the checkbox group the submit validation applies to. A form
/// without a group under this name has nothing to validate.
pub const ACTIVITY_GROUP: &str = "activity";

/// Message shown when a submission is blocked because nothing is checked.
pub const NO_SELECTION_MESSAGE: &str = "Please select at least one activity to run.";

/// Capability used to surface the validation block to the user. The GUI
/// implements this with a modal window; tests use a recording stub.
pub trait BlockingNotifier {
    fn show_blocking_message(&mut self, text: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub id: ActivityId,
    pub label: String,
    pub checked: bool,
}

/// Ordered group of labelled toggles. Order is fixed at construction and is
/// load-bearing: the basic/advanced presets select by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckboxGroup {
    entries: Vec<Checkbox>,
}

impl CheckboxGroup {
    pub fn new(entries: impl IntoIterator<Item = (ActivityId, String)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(id, label)| Checkbox {
                    id,
                    label,
                    checked: false,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Checkbox] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [Checkbox] {
        &mut self.entries
    }

    pub fn any_checked(&self) -> bool {
        self.entries.iter().any(|entry| entry.checked)
    }

    pub fn checked_ids(&self) -> Vec<ActivityId> {
        self.entries
            .iter()
            .filter(|entry| entry.checked)
            .map(|entry| entry.id)
            .collect()
    }

    pub fn select_all(&mut self) {
        self.recompute(|_| true);
    }

    pub fn deselect_all(&mut self) {
        self.recompute(|_| false);
    }

    pub fn select_basic(&mut self) {
        self.recompute(|position| position < BASIC_SPLIT);
    }

    pub fn select_advanced(&mut self) {
        self.recompute(|position| position >= BASIC_SPLIT);
    }

    // Every preset is a full recompute over current positions, never an
    // incremental edit, so repeated applications are idempotent.
    fn recompute(&mut self, rule: impl Fn(usize) -> bool) {
        for (position, entry) in self.entries.iter_mut().enumerate() {
            entry.checked = rule(position);
        }
    }
}

/// Outcome of a submission attempt. `Proceed` carries the checked ids in
/// group order; `Blocked` means the user was notified and nothing was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    Proceed(RunRequest),
    Blocked,
}

/// A named container owning zero or more named checkbox groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    name: String,
    groups: Vec<(String, CheckboxGroup)>,
}

impl Form {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
        }
    }

    pub fn with_group(mut self, group_name: impl Into<String>, group: CheckboxGroup) -> Self {
        self.groups.push((group_name.into(), group));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self, group_name: &str) -> Option<&CheckboxGroup> {
        self.groups
            .iter()
            .find(|(name, _)| name == group_name)
            .map(|(_, group)| group)
    }

    pub fn group_mut(&mut self, group_name: &str) -> Option<&mut CheckboxGroup> {
        self.groups
            .iter_mut()
            .find(|(name, _)| name == group_name)
            .map(|(_, group)| group)
    }

    /// Submit-time validation hook. A non-empty `activity` group must have
    /// at least one checked entry; otherwise the notifier fires once and the
    /// submission is blocked. A missing or empty group skips validation.
    pub fn validate_submit(&self, notifier: &mut dyn BlockingNotifier) -> SubmitDecision {
        let Some(group) = self.group(ACTIVITY_GROUP) else {
            return SubmitDecision::Proceed(RunRequest::new(Vec::new()));
        };
        if group.is_empty() {
            return SubmitDecision::Proceed(RunRequest::new(Vec::new()));
        }

        let checked = group.checked_ids();
        if checked.is_empty() {
            notifier.show_blocking_message(NO_SELECTION_MESSAGE);
            return SubmitDecision::Blocked;
        }
        SubmitDecision::Proceed(RunRequest::new(checked))
    }
}

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("no form named '{0}' was present at initialization")]
    UnknownForm(String),
}

/// Holds the forms discovered at startup and routes submissions through
/// their validation hooks.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    forms: Vec<Form>,
}

impl SelectionController {
    /// One-shot discovery: captures the forms present right now. Forms
    /// created later are not validated; re-initialization is out of scope.
    pub fn initialize(forms: Vec<Form>) -> Self {
        debug!(form_count = forms.len(), "selection controller initialized");
        Self { forms }
    }

    pub fn forms(&self) -> &[Form] {
        &self.forms
    }

    pub fn form(&self, name: &str) -> Result<&Form, SelectionError> {
        self.forms
            .iter()
            .find(|form| form.name() == name)
            .ok_or_else(|| SelectionError::UnknownForm(name.to_string()))
    }

    pub fn form_mut(&mut self, name: &str) -> Result<&mut Form, SelectionError> {
        self.forms
            .iter_mut()
            .find(|form| form.name() == name)
            .ok_or_else(|| SelectionError::UnknownForm(name.to_string()))
    }

    pub fn submit(
        &self,
        form_name: &str,
        notifier: &mut dyn BlockingNotifier,
    ) -> Result<SubmitDecision, SelectionError> {
        let decision = self.form(form_name)?.validate_submit(notifier);
        if decision == SubmitDecision::Blocked {
            debug!(form = form_name, "submission blocked: nothing selected");
        }
        Ok(decision)
    }
}

#[cfg(test)]
mod tests;
