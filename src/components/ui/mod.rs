mod alert;
mod spinner;

pub(crate) use alert::{Alert, AlertKind, ErrorBanner};
pub(crate) use spinner::Spinner;
