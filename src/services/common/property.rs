use std::fmt::Debug;

use futures::stream::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A reactive property that can be watched for changes.
///
/// When the value changes, all watchers are notified automatically.
/// Each watcher gets the current value immediately when subscribing.
#[derive(Clone)]
pub struct Property<T: Clone + Send + Sync + 'static> {
    tx: watch::Sender<T>,
    rx: watch::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(initial: T) -> Self {
        let (tx, rx) = watch::channel(initial);
        Self { tx, rx }
    }

    /// Set a new value and notify all watchers, unless `skip` says otherwise.
    ///
    /// Only updates if the value is different (requires PartialEq).
    /// `skip` runs while the channel lock is held, so a flag it reads cannot
    /// flip between the check and the write.
    /// Only accessible within the crate to prevent external modification.
    pub(crate) fn set_unless<F>(&self, new_value: T, skip: F)
    where
        T: PartialEq,
        F: FnOnce() -> bool,
    {
        let _ = self.tx.send_if_modified(|current| {
            if skip() || *current == new_value {
                return false;
            }
            *current = new_value;
            true
        });
    }

    /// Modify the value in place while holding the channel lock.
    ///
    /// The closure returns whether it changed anything; watchers are only
    /// notified when it did. Reading and writing happen atomically with
    /// respect to other writers.
    pub(crate) fn update<F>(&self, modify: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        self.tx.send_if_modified(modify)
    }

    /// Get the current value.
    ///
    /// This is a synchronous operation that clones the current value.
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Watch for changes to this property.
    ///
    /// The stream immediately yields the current value, then yields
    /// whenever the value changes.
    pub fn watch(&self) -> impl Stream<Item = T> + Send + 'static {
        WatchStream::new(self.rx.clone())
    }
}

impl<T: Clone + Send + Sync + Debug + 'static> Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}
