pub mod achievement_toast;
pub mod app;
pub mod game_view;
pub mod level_complete_overlay;
pub mod level_select;
pub mod settings_modal;
pub mod stats_panel;
pub mod time_display;

use std::cell::RefCell;
use std::rc::Rc;

use crate::progress::ProgressStore;
use crate::storage::Backend;

/// Shared handle to the one progress store. Equality is identity, so
/// components re-render on the `version` prop they are given alongside it.
#[derive(Clone)]
pub struct StoreHandle(pub Rc<RefCell<ProgressStore<Backend>>>);

impl PartialEq for StoreHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
