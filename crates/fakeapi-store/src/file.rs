use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, info};

use fakeapi_core::{ApiSchema, Plan};

use crate::atomic::write_bytes_atomic;
use crate::error::{StoreError, StoreResult};
use crate::state::StoreState;
use crate::store::SchemaStore;

/// Store persisted as a single JSON document, rewritten atomically on every
/// mutation. A failed write leaves both the file and the in-memory view
/// unchanged.
///
/// Several processes may share the file (a running server and `fakeapi plan`).
/// Reads reload the document when its modification time or length changed
/// since this handle last saw it, and every mutation re-reads the file under
/// the write lock before applying the change. Writers in different processes
/// are not serialized against each other. The whole document is rewritten on
/// each mutation, so the backend suits small, low-write workloads.
#[derive(Debug)]
pub struct JsonFileSchemaStore {
    path: PathBuf,
    snapshot: RwLock<Snapshot>,
}

#[derive(Debug)]
struct Snapshot {
    state: StoreState,
    stamp: Option<FileStamp>,
}

/// What a handle remembers about the file it last read or wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: SystemTime,
    len: u64,
}

impl JsonFileSchemaStore {
    /// Open the store at `path`, starting empty when the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let snapshot = load_snapshot(&path)?;

        info!(
            event = "store_opened",
            path = %path.display(),
            schemas = snapshot.state.schemas.len()
        );

        Ok(Self {
            path,
            snapshot: RwLock::new(snapshot),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current view of the file, reloaded first if another handle changed it.
    async fn current(&self) -> StoreResult<RwLockReadGuard<'_, Snapshot>> {
        let path = self.path.clone();
        let stamp = blocking(move || file_stamp(&path)).await?;
        {
            let snapshot = self.snapshot.read().await;
            if snapshot.stamp == stamp {
                return Ok(snapshot);
            }
        }

        let mut snapshot = self.snapshot.write().await;
        if snapshot.stamp != stamp {
            let path = self.path.clone();
            *snapshot = blocking(move || load_snapshot(&path)).await?;
            debug!(event = "store_reloaded", path = %self.path.display());
        }
        Ok(snapshot.downgrade())
    }

    async fn mutate<T, F>(&self, apply: F) -> StoreResult<T>
    where
        F: FnOnce(&mut StoreState) -> StoreResult<T> + Send,
        T: Send,
    {
        let mut snapshot = self.snapshot.write().await;

        let path = self.path.clone();
        let mut next = blocking(move || load_snapshot(&path)).await?.state;
        let outcome = apply(&mut next)?;

        let bytes = serde_json::to_vec_pretty(&next)?;
        let path = self.path.clone();
        let stamp = blocking(move || {
            write_bytes_atomic(&path, &bytes)?;
            file_stamp(&path)
        })
        .await?;

        *snapshot = Snapshot { state: next, stamp };
        Ok(outcome)
    }
}

fn load_snapshot(path: &Path) -> StoreResult<Snapshot> {
    let stamp = file_stamp(path)?;
    let state = match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str::<StoreState>(&content)?,
        Err(err) if err.kind() == ErrorKind::NotFound => StoreState::default(),
        Err(err) => return Err(err.into()),
    };
    Ok(Snapshot { state, stamp })
}

fn file_stamp(path: &Path) -> StoreResult<Option<FileStamp>> {
    match std::fs::metadata(path) {
        Ok(metadata) => Ok(Some(FileStamp {
            modified: metadata.modified()?,
            len: metadata.len(),
        })),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Run filesystem work on the blocking pool.
async fn blocking<T, F>(work: F) -> StoreResult<T>
where
    F: FnOnce() -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| StoreError::Io(std::io::Error::other(err)))?
}

#[async_trait]
impl SchemaStore for JsonFileSchemaStore {
    fn backend(&self) -> &'static str {
        "json_file"
    }

    async fn find_by_endpoint(&self, endpoint_id: &str) -> StoreResult<Option<ApiSchema>> {
        Ok(self.current().await?.state.find_by_endpoint(endpoint_id).cloned())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<ApiSchema>> {
        Ok(self.current().await?.state.find_by_id(id).cloned())
    }

    async fn list_by_owner(&self, owner: &str) -> StoreResult<Vec<ApiSchema>> {
        Ok(self.current().await?.state.list_by_owner(owner))
    }

    async fn insert(&self, schema: ApiSchema) -> StoreResult<()> {
        self.mutate(move |state| state.insert(schema)).await
    }

    async fn insert_within_quota(
        &self,
        schema: ApiSchema,
        free_tier_limit: usize,
    ) -> StoreResult<()> {
        self.mutate(move |state| state.insert_within_quota(schema, free_tier_limit))
            .await
    }

    async fn update(&self, schema: ApiSchema) -> StoreResult<bool> {
        self.mutate(move |state| state.update(schema)).await
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        self.mutate(|state| Ok(state.delete(id))).await
    }

    async fn plan_for(&self, owner: &str) -> StoreResult<Plan> {
        Ok(self.current().await?.state.plan_for(owner))
    }

    async fn set_plan(&self, owner: &str, plan: Plan) -> StoreResult<()> {
        self.mutate(|state| {
            state.set_plan(owner, plan);
            Ok(())
        })
        .await
    }
}
