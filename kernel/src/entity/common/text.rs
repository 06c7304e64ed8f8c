use error_stack::Report;

use crate::KernelError;

pub(crate) fn filled(value: String, field: &'static str) -> error_stack::Result<String, KernelError> {
    if value.trim().is_empty() {
        return Err(Report::new(KernelError::Validation)
            .attach_printable(format!("`{field}` must not be empty")));
    }
    Ok(value)
}
