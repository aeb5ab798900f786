//! Use case behind the create-group dialog: client-side validation,
//! the busy latch that stops double submits, and the queued API call.

use crate::domain::group_form_state::GroupFormState;

use super::contracts::{ApiCommand, ApiGateway};

pub const MAX_GROUP_NAME_CHARS: usize = 100;
pub const MAX_GROUP_DESCRIPTION_CHARS: usize = 50;

pub const NAME_MISSING_WARNING: &str = "Vui lòng nhập tên nhóm";
pub const NAME_TOO_LONG_WARNING: &str = "Tên nhóm không được vượt quá 100 ký tự";
pub const DESCRIPTION_TOO_LONG_WARNING: &str = "Mô tả không được vượt quá 50 ký tự";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGroupCommand {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateGroupError {
    NameMissing,
    NameTooLong,
    DescriptionTooLong,
    /// Submit is already in flight.
    Busy,
    /// The API command could not be queued.
    RequestRejected,
}

impl CreateGroupError {
    /// The inline warning for validation failures; dispatch failures
    /// have no inline text and surface as a toast instead.
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            CreateGroupError::NameMissing => Some(NAME_MISSING_WARNING),
            CreateGroupError::NameTooLong => Some(NAME_TOO_LONG_WARNING),
            CreateGroupError::DescriptionTooLong => Some(DESCRIPTION_TOO_LONG_WARNING),
            CreateGroupError::Busy | CreateGroupError::RequestRejected => None,
        }
    }
}

/// Character-count validation, matching the form's limits. Counts are
/// in characters, not bytes: Vietnamese names are mostly multi-byte.
pub fn validate(command: &CreateGroupCommand) -> Result<(), CreateGroupError> {
    let name = command.name.trim();
    if name.is_empty() {
        return Err(CreateGroupError::NameMissing);
    }
    if name.chars().count() > MAX_GROUP_NAME_CHARS {
        return Err(CreateGroupError::NameTooLong);
    }
    if command.description.trim().chars().count() > MAX_GROUP_DESCRIPTION_CHARS {
        return Err(CreateGroupError::DescriptionTooLong);
    }
    Ok(())
}

/// Validates and submits the form. On validation failure the warning
/// lands in the form and nothing is dispatched; on success the form
/// goes busy until the API worker reports back.
pub fn submit_group(
    gateway: &dyn ApiGateway,
    form: &mut GroupFormState,
    command: CreateGroupCommand,
) -> Result<(), CreateGroupError> {
    if form.is_busy() {
        return Err(CreateGroupError::Busy);
    }

    if let Err(error) = validate(&command) {
        if let Some(warning) = error.warning() {
            form.set_warning(warning.to_owned());
        }
        return Err(error);
    }

    form.set_busy();
    match gateway.submit(ApiCommand::CreateGroup {
        name: command.name.trim().to_owned(),
        description: command.description.trim().to_owned(),
    }) {
        Ok(()) => Ok(()),
        Err(_) => {
            form.clear_busy();
            Err(CreateGroupError::RequestRejected)
        }
    }
}
