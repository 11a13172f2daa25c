use crate::pad::model::Color;

/// A value that reports whether a write actually changed it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Property<T> {
    value: T,
}

impl<T: PartialEq + Clone> Property<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Stores `value` and returns `true` only when it differs from the current one.
    pub fn replace(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyChange {
    PenColor(Color),
    PenWidth(u32),
    ShowBaseLine(bool),
    RedrawOnPenChange(bool),
    BackgroundColor(Color),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&PropertyChange)>;

/// Callbacks notified after a property changed value.
#[derive(Default)]
pub struct ChangeNotifier {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl ChangeNotifier {
    pub fn subscribe(&mut self, listener: impl FnMut(&PropertyChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, change: PropertyChange) {
        tracing::trace!(?change, "signpad property changed");
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
