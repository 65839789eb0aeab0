use crate::app_lib::AppError;

/// UI-facing view of one asynchronous request.
///
/// After settlement exactly one of these holds: `data` is set, `error` is
/// set, or both are empty. While `loading` the previous `data` stays visible.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<AppError>,
}

/// Mutations share the shape but start idle and never load on their own.
pub type MutationState<T> = RequestState<T>;

impl<T> RequestState<T> {
    /// Nothing requested yet.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }

    /// Initial state of a resource: loading iff it will fetch on mount.
    #[must_use]
    pub fn initial(enabled: bool) -> Self {
        Self {
            loading: enabled,
            ..Self::idle()
        }
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.loading
    }

    /// Marks a new invocation. Stale data is kept, stale errors are not.
    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Mutation cycles start from a clean slate.
    pub(crate) fn restart(&mut self) {
        *self = Self {
            loading: true,
            ..Self::idle()
        };
    }

    pub(crate) fn settle(&mut self, outcome: Result<T, AppError>) {
        *self = match outcome {
            Ok(data) => Self {
                data: Some(data),
                loading: false,
                error: None,
            },
            Err(error) => Self {
                data: None,
                loading: false,
                error: Some(error),
            },
        };
    }
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::RequestState;
    use crate::app_lib::AppError;

    #[test]
    fn begin_keeps_data_and_drops_error() {
        let mut state = RequestState {
            data: Some(1),
            loading: false,
            error: Some(AppError::Network("offline".to_string())),
        };
        state.begin();
        assert_eq!(state.data, Some(1));
        assert!(state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn settle_never_leaves_data_and_error_together() {
        let mut state = RequestState::initial(true);
        state.settle(Ok("projects"));
        assert_eq!(state.data, Some("projects"));
        assert!(state.is_settled());
        assert_eq!(state.error, None);

        state.begin();
        state.settle(Err(AppError::Timeout("slow".to_string())));
        assert_eq!(state.data, None);
        assert!(state.is_settled());
        assert!(state.error.is_some());
    }

    #[test]
    fn restart_clears_everything_but_loading() {
        let mut state = RequestState::idle();
        state.settle(Ok(5));
        state.restart();
        assert_eq!(state, RequestState { data: None, loading: true, error: None });
    }
}
