mod synchronizer;
mod view_state;

pub use synchronizer::ViewStateSynchronizer;
pub use view_state::ViewState;
