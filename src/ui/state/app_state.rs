use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::table::TableStore;

pub struct AppState {
    pub store: Signal<TableStore>,
    pub search: Signal<String>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: use_signal(TableStore::new),
            search: use_signal(String::new),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
        }
    }
}
