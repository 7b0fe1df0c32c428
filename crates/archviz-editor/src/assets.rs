use archviz_scene::FurnitureKind;

/// Monotonic id of a furniture load request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadToken(u64);

impl std::fmt::Display for LoadToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub token: LoadToken,
    pub kind: FurnitureKind,
    /// Selection epoch when the request was made.
    pub selection_epoch: u64,
}

/// Only the newest request may land; older completions are stale.
#[derive(Clone, Debug, Default)]
pub struct LoadTracker {
    issued: u64,
    pending: Option<LoadRequest>,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, kind: FurnitureKind, selection_epoch: u64) -> LoadRequest {
        self.issued += 1;
        let request = LoadRequest {
            token: LoadToken(self.issued),
            kind,
            selection_epoch,
        };
        self.pending = Some(request);
        request
    }

    /// Claims the pending request if `token` is the latest one.
    pub fn resolve(&mut self, token: LoadToken) -> Option<LoadRequest> {
        match self.pending {
            Some(request) if request.token == token => self.pending.take(),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<LoadRequest> {
        self.pending
    }
}
