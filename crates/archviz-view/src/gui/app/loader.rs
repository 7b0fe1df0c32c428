use archviz_base::Error;
use archviz_editor::LoadRequest;
use archviz_io::load_furniture;
use archviz_scene::ModelAsset;
use std::path::{Path, PathBuf};
use std::{sync::mpsc, thread};
use tracing::debug;

pub(super) struct LoadResult {
    pub request: LoadRequest,
    pub result: archviz_base::Result<ModelAsset>,
}

/// Reads furniture models off the UI thread.
pub(super) struct FurnitureLoader {
    models_dir: PathBuf,
    tx: mpsc::Sender<LoadResult>,
    rx: mpsc::Receiver<LoadResult>,
}

impl FurnitureLoader {
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            models_dir: models_dir.into(),
            tx,
            rx,
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn spawn(&self, request: LoadRequest) {
        let tx = self.tx.clone();
        let dir = self.models_dir.clone();
        thread::spawn(move || {
            debug!(furniture = request.kind.name(), token = %request.token, "loading model");
            let result = load_furniture(&dir, request.kind).map_err(|err| Error::AssetLoad {
                name: request.kind.file_name(),
                reason: format!("{err:#}"),
            });
            let _ = tx.send(LoadResult { request, result });
        });
    }

    pub fn drain(&self) -> Vec<LoadResult> {
        self.rx.try_iter().collect()
    }
}
