use super::text_input::TextFieldState;

/// Submit-button label while the create call is in flight.
pub const CREATING_LABEL: &str = "Đang tạo...";
pub const CREATE_LABEL: &str = "Tạo nhóm";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupFormFocus {
    #[default]
    Name,
    Description,
}

/// The create-group dialog: two text fields, a busy flag while the
/// request is in flight, and an inline validation warning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupFormState {
    name: TextFieldState,
    description: TextFieldState,
    focus: GroupFormFocus,
    busy: bool,
    warning: Option<String>,
}

impl GroupFormState {
    pub fn name(&self) -> &TextFieldState {
        &self.name
    }

    pub fn description(&self) -> &TextFieldState {
        &self.description
    }

    pub fn focus(&self) -> GroupFormFocus {
        self.focus
    }

    pub fn focused_field_mut(&mut self) -> &mut TextFieldState {
        match self.focus {
            GroupFormFocus::Name => &mut self.name,
            GroupFormFocus::Description => &mut self.description,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            GroupFormFocus::Name => GroupFormFocus::Description,
            GroupFormFocus::Description => GroupFormFocus::Name,
        };
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_busy(&mut self) {
        self.busy = true;
        self.warning = None;
    }

    /// Completion always re-enables the form, success or failure.
    pub fn clear_busy(&mut self) {
        self.busy = false;
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn set_warning(&mut self, warning: String) {
        self.warning = Some(warning);
    }

    pub fn submit_label(&self) -> &'static str {
        if self.busy {
            CREATING_LABEL
        } else {
            CREATE_LABEL
        }
    }

    /// Back to a blank form, as after a successful create.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_toggles_between_the_two_fields() {
        let mut form = GroupFormState::default();
        assert_eq!(form.focus(), GroupFormFocus::Name);

        form.toggle_focus();
        assert_eq!(form.focus(), GroupFormFocus::Description);

        form.toggle_focus();
        assert_eq!(form.focus(), GroupFormFocus::Name);
    }

    #[test]
    fn focused_field_receives_edits() {
        let mut form = GroupFormState::default();
        form.focused_field_mut().insert_char('a');
        form.toggle_focus();
        form.focused_field_mut().insert_char('b');

        assert_eq!(form.name().text(), "a");
        assert_eq!(form.description().text(), "b");
    }

    #[test]
    fn busy_swaps_the_submit_label() {
        let mut form = GroupFormState::default();
        assert_eq!(form.submit_label(), CREATE_LABEL);

        form.set_busy();
        assert_eq!(form.submit_label(), CREATING_LABEL);
        assert!(form.is_busy());

        form.clear_busy();
        assert_eq!(form.submit_label(), CREATE_LABEL);
    }

    #[test]
    fn set_busy_clears_a_stale_warning() {
        let mut form = GroupFormState::default();
        form.set_warning("Vui lòng nhập tên nhóm".to_owned());

        form.set_busy();

        assert_eq!(form.warning(), None);
    }

    #[test]
    fn reset_returns_to_a_blank_form() {
        let mut form = GroupFormState::default();
        form.focused_field_mut().insert_char('x');
        form.set_warning("warn".to_owned());
        form.set_busy();

        form.reset();

        assert_eq!(form, GroupFormState::default());
    }
}
