use std::borrow::Cow;

use error_stack::Report;
use thiserror::Error;
use validator::ValidateError;

#[derive(Debug, Error)]
#[error("Invalid given data occurred")]
pub struct Wrapper;

/// Flattens a [`ValidateError`] tree into a [`Report`] where every
/// message is attached as `path.to.field: message`.
pub trait IntoValidatorReport<T> {
    fn into_validator_report(self) -> error_stack::Result<T, Wrapper>;
}

impl<T> IntoValidatorReport<T> for Result<T, ValidateError> {
    fn into_validator_report(self) -> error_stack::Result<T, Wrapper> {
        self.map_err(|v| {
            let mut path = Vec::new();
            read_errors(&v, &mut path, Report::new(Wrapper))
        })
    }
}

fn read_errors<'a>(
    err: &'a ValidateError,
    path: &mut Vec<Cow<'a, str>>,
    mut report: Report<Wrapper>,
) -> Report<Wrapper> {
    match err {
        ValidateError::Fields(fields) => {
            for (field, data) in fields {
                path.push(Cow::Borrowed(field));
                report = read_errors(data, path, report);
                path.pop();
            }
            report
        }
        ValidateError::Messages(messages) => {
            let field = path.join(".");
            for message in messages {
                report = report.attach_printable(format!("{field}: {message}"));
            }
            report
        }
        ValidateError::Slice(slice) => {
            for (index, element) in slice.iter().enumerate() {
                if let Some(element) = element {
                    path.push(Cow::Owned(index.to_string()));
                    report = read_errors(element, path, report);
                    path.pop();
                }
            }
            report
        }
    }
}
