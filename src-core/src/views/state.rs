// FICHIER : src-core/src/views/state.rs

use crate::utils::{AppError, VitrineResult};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Cycle de vie des données d'une vue : `Loading -> Ready | Empty | Error`,
/// puis `Ready -> Ready` à chaque mutation locale.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    /// Ressource introuvable : état vide, pas une erreur.
    Empty,
    Error(String),
}

impl<T> ViewState<T> {
    pub fn from_result(result: VitrineResult<T>) -> Self {
        match result {
            Ok(data) => ViewState::Ready(data),
            Err(AppError::NotFound(what)) => {
                debug!("Ressource absente ({}), état vide", what);
                ViewState::Empty
            }
            Err(e) => ViewState::Error(e.user_message()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Emplacement de données d'une vue montée.
/// Un chargement qui se termine après le démontage est ignoré ; le démontage
/// annule aussi la tâche en cours.
pub struct ViewSlot<T> {
    state: Arc<RwLock<ViewState<T>>>,
    mounted: Arc<AtomicBool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<T> Default for ViewSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn read<T>(lock: &RwLock<ViewState<T>>) -> RwLockReadGuard<'_, ViewState<T>> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<ViewState<T>>) -> RwLockWriteGuard<'_, ViewState<T>> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<T> ViewSlot<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(ViewState::Loading)),
            mounted: Arc::new(AtomicBool::new(true)),
            task: Mutex::new(None),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Lecture de l'état sous verrou.
    pub fn with<R>(&self, f: impl FnOnce(&ViewState<T>) -> R) -> R {
        f(&*read(&self.state))
    }

    /// Remplace l'état, sauf si la vue est démontée.
    pub fn settle(&self, result: VitrineResult<T>) -> bool {
        let mut guard = write(&self.state);
        if !self.is_mounted() {
            debug!("Résultat tardif ignoré (vue démontée)");
            return false;
        }
        *guard = ViewState::from_result(result);
        true
    }

    /// Mutation locale des données prêtes. Sans effet hors de `Ready`.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let mut guard = write(&self.state);
        match guard.data_mut() {
            Some(data) if self.is_mounted() => {
                f(data);
                true
            }
            _ => false,
        }
    }

    pub fn unmount(&self) {
        {
            let _guard = write(&self.state);
            self.mounted.store(false, Ordering::Release);
        }
        let handle = self
            .task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

impl<T: Clone> ViewSlot<T> {
    pub fn snapshot(&self) -> ViewState<T> {
        read(&self.state).clone()
    }
}

impl<T: Send + Sync + 'static> ViewSlot<T> {
    /// Lance un chargement en tâche de fond. Un chargement précédent encore
    /// en vol est annulé.
    pub fn spawn<F>(&self, load: F)
    where
        F: Future<Output = VitrineResult<T>> + Send + 'static,
    {
        if !self.is_mounted() {
            return;
        }
        *write(&self.state) = ViewState::Loading;

        let state = Arc::clone(&self.state);
        let mounted = Arc::clone(&self.mounted);
        let handle = tokio::spawn(async move {
            let result = load.await;
            let mut guard = write(&state);
            if mounted.load(Ordering::Acquire) {
                *guard = ViewState::from_result(result);
            } else {
                debug!("Résultat tardif ignoré (vue démontée)");
            }
        });

        let previous = self
            .task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Attend la fin du chargement en cours (s'il y en a un).
    pub async fn settled(&self) {
        let handle = self
            .task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!("⚠️ Tâche de chargement interrompue : {}", e);
                }
            }
        }
    }
}

impl<T> Drop for ViewSlot<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}
