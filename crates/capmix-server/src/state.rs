use capmix_core::caps::CapPool;

/// Read-only server state: the cap catalog plus run defaults.
pub struct AppState {
    pub pool: CapPool,
    pub default_iterations: u64,
}

impl AppState {
    pub fn new(pool: CapPool, default_iterations: u64) -> Self {
        Self {
            pool,
            default_iterations,
        }
    }
}
