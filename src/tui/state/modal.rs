/// Whether an overlay is open, with its data when it is
///
/// ```rust,ignore
/// tutorial: ModalState<()>,
/// alert: ModalState<Alert>,
/// attach_prompt: ModalState<AttachPrompt>,
/// ```
#[derive(Clone, Debug)]
pub enum ModalState<T> {
    Closed,
    Open(T),
}

impl<T> Default for ModalState<T> {
    fn default() -> Self {
        ModalState::Closed
    }
}

impl<T> ModalState<T> {
    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ModalState::Open(data) => Some(data),
            ModalState::Closed => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            ModalState::Open(data) => Some(data),
            ModalState::Closed => None,
        }
    }

    pub fn open_with(&mut self, data: T) {
        *self = ModalState::Open(data);
    }

    /// Close and hand back the data, if any
    pub fn take(&mut self) -> Option<T> {
        match std::mem::take(self) {
            ModalState::Open(data) => Some(data),
            ModalState::Closed => None,
        }
    }

    pub fn close(&mut self) {
        *self = ModalState::Closed;
    }
}

impl ModalState<()> {
    pub fn open_empty(&mut self) {
        *self = ModalState::Open(());
    }
}
