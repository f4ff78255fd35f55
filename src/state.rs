use pathsearch::search::{ConcatenatedIndex, PathSearchService};

/// Shared application state / 应用共享状态
///
/// Both indexes are fully built before the state is created and are
/// read-only afterwards.
pub struct AppState {
    pub service: PathSearchService,
    pub concatenated: ConcatenatedIndex,
}
