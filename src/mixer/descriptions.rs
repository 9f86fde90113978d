//! Repairs empty response descriptions.
//!
//! `description` is required for inline responses and an explicit `""` is valid. Empty
//! descriptions are left out when a [`Response`] is serialized though, so a valid document
//! that was read and written again would lose the field and become invalid. Filling in a
//! placeholder keeps the written document valid.
use crate::swagger::{Response, Responses, Swagger};

/// Placeholder written over empty descriptions.
pub const EMPTY_DESCRIPTION: &str = "(empty)";

/// Replace empty descriptions of every operation response and every top level response of
/// `swagger` with [`EMPTY_DESCRIPTION`]. References are left untouched.
///
/// Operations of every method including `options` are visited. Running this more than once
/// has no further effect. Returns the number of repaired responses.
pub fn fix_empty_response_descriptions(swagger: &mut Swagger) -> usize {
    let mut fixed = 0;
    for item in swagger.paths.paths.values_mut() {
        for operation in item.operations_mut() {
            fixed += fix_empty_descriptions(&mut operation.responses);
        }
    }
    for response in swagger.responses.values_mut() {
        fixed += usize::from(fix_empty_description(response));
    }

    fixed
}

/// Repair the default and every status code response of `responses`.
pub fn fix_empty_descriptions(responses: &mut Responses) -> usize {
    let mut fixed = 0;
    if let Some(default) = responses.default.as_mut() {
        fixed += usize::from(fix_empty_description(default));
    }
    for response in responses.status_codes.values_mut() {
        fixed += usize::from(fix_empty_description(response));
    }

    fixed
}

/// Set [`EMPTY_DESCRIPTION`] on `response` if it is inline and has no description. Returns
/// whether the response was changed.
pub fn fix_empty_description(response: &mut Response) -> bool {
    if response.is_ref() || !response.description.is_empty() {
        return false;
    }
    response.description = EMPTY_DESCRIPTION.to_string();

    true
}
