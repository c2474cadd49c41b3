use error_stack::{Context, Report};

/// Dissects a [`figment::Error`] into printable attachments so a
/// failed configuration load says which key and which source
/// were at fault.
pub trait FigmentErrorAttachable<T: Context> {
    fn attach_figment_error(self, err: figment::Error) -> Report<T>;
}

impl<T: Context> FigmentErrorAttachable<T> for Report<T> {
    fn attach_figment_error(self, e: figment::Error) -> Report<T> {
        // figment chains every failed key into one error
        e.into_iter().fold(self, attach_single)
    }
}

fn attach_single<T: Context>(report: Report<T>, e: figment::Error) -> Report<T> {
    let mut report = report.attach_printable(format!("{}", e.kind));

    if let (Some(profile), Some(md)) = (&e.profile, &e.metadata) {
        if !e.path.is_empty() {
            let key = md.interpolate(profile, &e.path);
            report = report.attach_printable(format!("for key {key:?}"));
        }
    }

    if let Some(md) = &e.metadata {
        report = match &md.source {
            Some(source) => report.attach_printable(format!("in {source} {}", md.name)),
            None => report.attach_printable(format!("in {}", md.name)),
        };
    }

    report
}
