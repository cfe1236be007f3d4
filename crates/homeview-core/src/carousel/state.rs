use crate::timer::TimerHandle;

/// Static description of one panel in the rotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSpec {
    pub id: String,
    pub auto_advance_duration_ms: u64,
}

impl PanelSpec {
    pub fn new(id: impl Into<String>, auto_advance_duration_ms: u64) -> Self {
        Self {
            id: id.into(),
            auto_advance_duration_ms,
        }
    }
}

/// Mutable rotation state, owned by the scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    /// Always `< panel count` (0 when there are no panels)
    pub current_index: usize,
    /// User-controlled master switch
    pub auto_rotate_enabled: bool,
    /// Transient suppression while someone interacts
    pub paused: bool,
    /// The single live auto-advance timer, if any
    pub pending_timer: Option<TimerHandle>,
}

impl CarouselState {
    pub fn new(auto_rotate_enabled: bool) -> Self {
        Self {
            current_index: 0,
            auto_rotate_enabled,
            paused: false,
            pending_timer: None,
        }
    }

    /// Whether the clock should be running right now
    pub fn is_rotating(&self) -> bool {
        self.auto_rotate_enabled && !self.paused
    }
}
