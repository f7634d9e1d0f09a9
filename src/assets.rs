//! Image asset registry
//!
//! Tracks load state separately from the image resources themselves. The
//! browser backend owns the actual `HtmlImageElement`s and reports outcomes
//! here; the renderer only ever consults the registry.

/// Load state of a single asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetState {
    #[default]
    Pending,
    Ready {
        width: u32,
        height: u32,
    },
    Failed,
}

impl AssetState {
    pub fn is_ready(&self) -> bool {
        matches!(self, AssetState::Ready { .. })
    }

    /// Size in pixels once loaded
    pub fn size(&self) -> Option<(u32, u32)> {
        match *self {
            AssetState::Ready { width, height } => Some((width, height)),
            _ => None,
        }
    }
}

/// Number of store images composited onto the background
pub const STORE_COUNT: usize = 4;

/// Known assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    PlayerSprite,
    Store(usize),
}

impl AssetId {
    /// Every asset the game loads, in load order
    pub fn all() -> impl Iterator<Item = AssetId> {
        std::iter::once(AssetId::PlayerSprite).chain((0..STORE_COUNT).map(AssetId::Store))
    }

    pub fn path(&self) -> String {
        match self {
            AssetId::PlayerSprite => "assets/pixelarkadon.png".to_string(),
            AssetId::Store(i) => format!("assets/store_{}.png", i + 1),
        }
    }
}

/// Load state of every asset
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    player: AssetState,
    stores: [AssetState; STORE_COUNT],
    /// Stores already composited onto the cached background
    stores_patched: [bool; STORE_COUNT],
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, id: AssetId) -> AssetState {
        match id {
            AssetId::PlayerSprite => self.player,
            AssetId::Store(i) => self.stores.get(i).copied().unwrap_or(AssetState::Failed),
        }
    }

    /// Record a load outcome. Only `Pending` assets transition; later
    /// reports for a settled asset are ignored.
    pub fn set(&mut self, id: AssetId, state: AssetState) {
        let slot = match id {
            AssetId::PlayerSprite => &mut self.player,
            AssetId::Store(i) => match self.stores.get_mut(i) {
                Some(slot) => slot,
                None => return,
            },
        };
        if *slot != AssetState::Pending {
            return;
        }
        match state {
            AssetState::Ready { width, height } => {
                log::info!("Asset ready: {} ({}x{})", id.path(), width, height)
            }
            AssetState::Failed => log::warn!("Asset failed to load: {}", id.path()),
            AssetState::Pending => {}
        }
        *slot = state;
    }

    pub fn mark_ready(&mut self, id: AssetId, width: u32, height: u32) {
        self.set(id, AssetState::Ready { width, height });
    }

    pub fn mark_failed(&mut self, id: AssetId) {
        self.set(id, AssetState::Failed);
    }

    /// Ready stores not yet composited onto the background. Marks them as
    /// patched, so each store is returned exactly once.
    pub fn take_unpatched_stores(&mut self) -> Vec<usize> {
        let mut out = Vec::new();
        for i in 0..STORE_COUNT {
            if self.stores[i].is_ready() && !self.stores_patched[i] {
                self.stores_patched[i] = true;
                out.push(i);
            }
        }
        out
    }

    /// True once nothing is pending any more
    pub fn all_settled(&self) -> bool {
        AssetId::all().all(|id| self.state(id) != AssetState::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let paths: Vec<_> = AssetId::all().map(|id| id.path()).collect();
        assert_eq!(paths[0], "assets/pixelarkadon.png");
        assert_eq!(paths[1], "assets/store_1.png");
        assert_eq!(paths[4], "assets/store_4.png");
        assert_eq!(paths.len(), 5);
    }

    #[test]
    fn test_failure_is_permanent() {
        let mut reg = AssetRegistry::new();
        assert_eq!(reg.state(AssetId::PlayerSprite), AssetState::Pending);
        reg.mark_failed(AssetId::PlayerSprite);
        reg.mark_ready(AssetId::PlayerSprite, 10, 10);
        assert_eq!(reg.state(AssetId::PlayerSprite), AssetState::Failed);
    }

    #[test]
    fn test_store_patched_once() {
        let mut reg = AssetRegistry::new();
        assert!(reg.take_unpatched_stores().is_empty());

        reg.mark_ready(AssetId::Store(2), 150, 150);
        reg.mark_failed(AssetId::Store(0));
        assert_eq!(reg.take_unpatched_stores(), vec![2]);
        assert!(reg.take_unpatched_stores().is_empty());

        reg.mark_ready(AssetId::Store(1), 150, 150);
        assert_eq!(reg.take_unpatched_stores(), vec![1]);
        assert!(!reg.all_settled());

        reg.mark_ready(AssetId::Store(3), 150, 150);
        reg.mark_failed(AssetId::PlayerSprite);
        assert!(reg.all_settled());
    }

    #[test]
    fn test_out_of_range_store() {
        let mut reg = AssetRegistry::new();
        reg.mark_ready(AssetId::Store(9), 1, 1);
        assert_eq!(reg.state(AssetId::Store(9)), AssetState::Failed);
    }
}
