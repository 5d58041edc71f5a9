//! Page lifecycle: `Loading -> Ready`, `Ready -> Submitting -> Ready | Failed`.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Submitting,
    Failed(String),
}

impl LoadState {
    pub fn begin_load(&mut self) {
        *self = LoadState::Loading;
    }

    pub fn finish_load<E: ToString>(&mut self, result: Result<(), E>) {
        *self = match result {
            Ok(()) => LoadState::Ready,
            Err(e) => LoadState::Failed(e.to_string()),
        };
    }

    /// Returns false (and changes nothing) while a load or submit is running
    pub fn begin_submit(&mut self) -> bool {
        match self {
            LoadState::Ready | LoadState::Failed(_) => {
                *self = LoadState::Submitting;
                true
            }
            LoadState::Loading | LoadState::Submitting => false,
        }
    }

    pub fn finish_submit<E: ToString>(&mut self, result: Result<(), E>) {
        if *self != LoadState::Submitting {
            return;
        }
        *self = match result {
            Ok(()) => LoadState::Ready,
            Err(e) => LoadState::Failed(e.to_string()),
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, LoadState::Submitting)
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, LoadState::Loading | LoadState::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_then_submit() {
        let mut state = LoadState::default();
        assert!(state.is_loading());
        assert!(!state.begin_submit());

        state.finish_load::<String>(Ok(()));
        assert_eq!(state, LoadState::Ready);

        assert!(state.begin_submit());
        assert!(state.is_busy());
        assert!(!state.begin_submit());

        state.finish_submit(Err("HTTP 500"));
        assert_eq!(state.error(), Some("HTTP 500"));

        assert!(state.begin_submit());
        state.finish_submit::<String>(Ok(()));
        assert_eq!(state, LoadState::Ready);
    }

    #[test]
    fn test_failed_load_keeps_message() {
        let mut state = LoadState::default();
        state.finish_load(Err("Erro de conexão com o servidor: refused"));
        assert_eq!(state.error(), Some("Erro de conexão com o servidor: refused"));
        state.begin_load();
        assert!(state.error().is_none());
    }

    #[test]
    fn test_finish_submit_outside_submit_is_ignored() {
        let mut state = LoadState::Loading;
        state.finish_submit::<String>(Ok(()));
        assert!(state.is_loading());
    }
}
