use crate::{
    BlockingNotifier, CheckboxGroup, Form, SelectionController, SelectionError, SubmitDecision,
    ACTIVITY_GROUP, NO_SELECTION_MESSAGE,
};
use catalog::domain::{builtin_activities, ActivityId, BASIC_SPLIT};
use catalog::protocol::RunRequest;

#[derive(Default)]
struct RecordingNotifier {
    messages: Vec<String>,
}

impl BlockingNotifier for RecordingNotifier {
    fn show_blocking_message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}

fn group_of(len: usize) -> CheckboxGroup {
    CheckboxGroup::new((1..=len as u32).map(|id| (ActivityId(id), format!("Activity {id}"))))
}

fn checked_flags(group: &CheckboxGroup) -> Vec<bool> {
    group.entries().iter().map(|entry| entry.checked).collect()
}

fn form_with_group(group: CheckboxGroup) -> Form {
    Form::new("run").with_group(ACTIVITY_GROUP, group)
}

#[test]
fn new_group_starts_fully_unchecked() {
    let group = CheckboxGroup::new(
        builtin_activities()
            .into_iter()
            .map(|activity| (activity.id, activity.title)),
    );
    assert_eq!(group.len(), 12);
    assert!(!group.any_checked());
}

#[test]
fn select_all_checks_every_entry() {
    let mut group = group_of(7);
    group.select_all();
    assert!(checked_flags(&group).iter().all(|&checked| checked));
}

#[test]
fn select_all_is_idempotent() {
    let mut group = group_of(7);
    group.select_all();
    let once = group.clone();
    group.select_all();
    assert_eq!(group, once);
}

#[test]
fn deselect_all_unchecks_every_entry() {
    let mut group = group_of(7);
    group.select_all();
    group.deselect_all();
    assert!(!group.any_checked());
}

#[test]
fn presets_on_an_empty_group_are_no_ops() {
    let mut group = group_of(0);
    group.select_all();
    group.select_basic();
    group.select_advanced();
    group.deselect_all();
    assert!(group.is_empty());
}

#[test]
fn basic_preset_checks_only_the_leading_split() {
    let mut group = group_of(11);
    group.select_all();
    group.select_basic();
    let flags = checked_flags(&group);
    assert!(flags[..BASIC_SPLIT].iter().all(|&checked| checked));
    assert!(flags[BASIC_SPLIT..].iter().all(|&checked| !checked));
}

#[test]
fn advanced_preset_checks_only_the_remainder() {
    let mut group = group_of(11);
    group.select_basic();
    group.select_advanced();
    let flags = checked_flags(&group);
    assert!(flags[..BASIC_SPLIT].iter().all(|&checked| !checked));
    assert!(flags[BASIC_SPLIT..].iter().all(|&checked| checked));
}

#[test]
fn basic_and_advanced_are_exact_complements() {
    let mut basic = group_of(9);
    let mut advanced = group_of(9);
    basic.select_basic();
    advanced.select_advanced();
    for (left, right) in checked_flags(&basic).iter().zip(checked_flags(&advanced)) {
        assert_ne!(*left, right);
    }
}

#[test]
fn presets_on_a_group_smaller_than_the_split() {
    let mut group = group_of(3);
    group.select_basic();
    assert!(checked_flags(&group).iter().all(|&checked| checked));
    group.select_advanced();
    assert!(!group.any_checked());
}

#[test]
fn submit_with_nothing_checked_is_blocked_with_the_literal_message() {
    let form = form_with_group(group_of(5));
    let mut notifier = RecordingNotifier::default();

    assert_eq!(form.validate_submit(&mut notifier), SubmitDecision::Blocked);
    assert_eq!(notifier.messages, vec![NO_SELECTION_MESSAGE.to_string()]);
}

#[test]
fn submit_with_a_selection_proceeds_without_notifying() {
    let mut group = group_of(6);
    group.entries_mut()[1].checked = true;
    group.entries_mut()[4].checked = true;
    let form = form_with_group(group);
    let mut notifier = RecordingNotifier::default();

    let decision = form.validate_submit(&mut notifier);
    assert_eq!(
        decision,
        SubmitDecision::Proceed(RunRequest::new(vec![ActivityId(2), ActivityId(5)]))
    );
    assert!(notifier.messages.is_empty());
}

#[test]
fn checked_ids_keep_group_order_regardless_of_click_order() {
    let mut group = group_of(6);
    group.entries_mut()[5].checked = true;
    group.entries_mut()[0].checked = true;
    assert_eq!(group.checked_ids(), vec![ActivityId(1), ActivityId(6)]);
}

#[test]
fn form_without_an_activity_group_proceeds_unconditionally() {
    let form = Form::new("search").with_group("options", group_of(3));
    let mut notifier = RecordingNotifier::default();

    let decision = form.validate_submit(&mut notifier);
    assert_eq!(decision, SubmitDecision::Proceed(RunRequest::new(Vec::new())));
    assert!(notifier.messages.is_empty());
}

#[test]
fn form_with_an_empty_activity_group_skips_validation() {
    let form = form_with_group(group_of(0));
    let mut notifier = RecordingNotifier::default();

    let decision = form.validate_submit(&mut notifier);
    assert_eq!(decision, SubmitDecision::Proceed(RunRequest::new(Vec::new())));
    assert!(notifier.messages.is_empty());
}

#[test]
fn controller_rejects_forms_it_never_discovered() {
    let controller = SelectionController::initialize(vec![form_with_group(group_of(4))]);
    let mut notifier = RecordingNotifier::default();

    let err = controller.submit("later-added", &mut notifier).unwrap_err();
    assert!(matches!(err, SelectionError::UnknownForm(name) if name == "later-added"));
    assert!(notifier.messages.is_empty());
}

#[test]
fn controller_routes_submission_through_the_named_form() {
    let mut controller = SelectionController::initialize(vec![form_with_group(group_of(5))]);
    controller
        .form_mut("run")
        .expect("form discovered at init")
        .group_mut(ACTIVITY_GROUP)
        .expect("activity group")
        .select_basic();

    let mut notifier = RecordingNotifier::default();
    let decision = controller.submit("run", &mut notifier).expect("known form");
    assert_eq!(
        decision,
        SubmitDecision::Proceed(RunRequest::new(vec![
            ActivityId(1),
            ActivityId(2),
            ActivityId(3),
            ActivityId(4),
        ]))
    );
}
