use dioxus::prelude::*;
use rfd::FileDialog;
use tracing::warn;

use crate::config::Settings;
use crate::domain::entities::row::RowId;
use crate::ui::state::app_state::AppState;
use crate::usecase::services::export_service::ExportService;
use crate::usecase::services::import_service::{apply_upload, ImportService};
use crate::usecase::services::query_service::table_view;

pub fn root_container_style() -> &'static str {
    "height: 100vh; display: flex; flex-direction: column; padding: 12px; box-sizing: border-box; font-family: sans-serif;"
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #bbb;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; background: #f0f0f0; border: 1px solid #bbb; padding: 4px; text-align: left;"
}

const CELL_STYLE: &str = "border: 1px solid #bbb; padding: 4px;";

#[component]
pub fn App() -> Element {
    let AppState {
        mut store,
        mut search,
        mut busy,
        mut status,
    } = AppState::new();

    let settings = use_hook(Settings::load_or_default);
    let import_service = use_hook(|| match ImportService::from_settings(&settings.upload) {
        Ok(service) => Some(service),
        Err(err) => {
            warn!(error = %err, "upload client unavailable");
            None
        }
    });
    let export_service = ExportService::from_settings(&settings.export);

    let view = table_view(&store.read(), &search());
    let editing = store.read().editing().cloned();
    let new_row = store.read().new_row().clone();
    let columns = view.columns.clone();
    let visible_count = view.rows.len();
    let total_rows = view.total_rows;
    let status_text = status();
    let is_empty = store.read().is_empty();

    let handle_open = move |_: MouseEvent| {
        let Some(service) = import_service.clone() else {
            *status.write() = "Upload is not available, check the log".to_string();
            return;
        };
        let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .add_filter("All files", &["*"])
            .pick_file()
        else {
            return;
        };

        *busy.write() = true;
        *status.write() = format!(
            "Loading {} via {}",
            path.display(),
            service.backend().describe()
        );
        spawn(async move {
            let result = service.fetch_rows(&path).await;
            match apply_upload(&mut store.write(), &path, result) {
                Some(row_count) => {
                    *status.write() = format!("Loaded {} rows from {}", row_count, path.display());
                }
                None => {
                    *status.write() = "Upload failed, table unchanged".to_string();
                }
            }
            *busy.write() = false;
        });
    };

    let handle_export = move |_: MouseEvent| {
        let artifact = match export_service.export(&store.read()) {
            Ok(artifact) => artifact,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "export failed");
                *status.write() = format!("Export failed: {err}");
                return;
            }
        };
        let Some(path) = FileDialog::new()
            .set_file_name(artifact.file_name)
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };
        match artifact.write_to(&path) {
            Ok(()) => *status.write() = format!("Exported to {}", path.display()),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "export failed");
                *status.write() = format!("Export failed: {err}");
            }
        }
    };

    let mut begin_edit = move |id: RowId| {
        if let Err(err) = store.write().begin_edit(id) {
            warn!(error = %err, "edit not started");
            *status.write() = err.to_string();
        }
    };

    let mut commit_edit = move || match store.write().commit_edit() {
        Ok(id) => *status.write() = format!("Saved row {id}"),
        Err(err) => {
            warn!(error = %err, "edit not saved");
            *status.write() = err.to_string();
        }
    };

    let mut delete_row = move |id: RowId| match store.write().delete_row(id) {
        Ok(_) => *status.write() = format!("Deleted row {id}"),
        Err(err) => {
            warn!(error = %err, "row not deleted");
            *status.write() = err.to_string();
        }
    };

    rsx! {
        div { style: "{root_container_style()}",
            div { style: "display: flex; gap: 12px; align-items: center; margin-bottom: 12px;",
                button { disabled: busy(), onclick: handle_open, "Open CSV" }
                input {
                    placeholder: "Search...",
                    value: search(),
                    oninput: move |event| search.set(event.value()),
                }
                button { onclick: handle_export, "Export CSV" }
                span { "{visible_count} / {total_rows} rows" }
            }

            div { style: "{table_container_style()}",
                table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                    thead {
                        tr {
                            for header in columns.iter() {
                                th { style: "{table_header_cell_style()}", "{header}" }
                            }
                            th { style: "{table_header_cell_style()}", "Edit" }
                            th { style: "{table_header_cell_style()}", "Delete" }
                        }
                    }
                    tbody {
                        for view_row in view.rows.iter() {
                            tr { key: "{view_row.id}",
                                {
                                    let row_id = view_row.id;
                                    let edit_row = editing
                                        .as_ref()
                                        .filter(|edit| edit.row_id == row_id)
                                        .map(|edit| edit.row.clone());
                                    match edit_row {
                                        Some(edit_row) => rsx! {
                                            {columns.iter().map(|column| {
                                                let value = edit_row.get(column).unwrap_or("").to_string();
                                                let column = column.clone();
                                                rsx!(
                                                    td { style: "{CELL_STYLE}",
                                                        input {
                                                            value: value,
                                                            oninput: move |event| {
                                                                if let Err(err) = store.write().update_edit_field(&column, &event.value()) {
                                                                    warn!(error = %err, "edit field ignored");
                                                                }
                                                            }
                                                        }
                                                    }
                                                )
                                            })}
                                            td { style: "{CELL_STYLE}",
                                                button { onclick: move |_| commit_edit(), "Save" }
                                                button { onclick: move |_| store.write().cancel_edit(), "Cancel" }
                                            }
                                        },
                                        None => rsx! {
                                            for value in view_row.cells.iter() {
                                                td { style: "{CELL_STYLE}", "{value}" }
                                            }
                                            td { style: "{CELL_STYLE}",
                                                button { onclick: move |_| begin_edit(row_id), "Edit" }
                                            }
                                        },
                                    }
                                }
                                td { style: "{CELL_STYLE}",
                                    button {
                                        onclick: {
                                            let row_id = view_row.id;
                                            move |_| delete_row(row_id)
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if is_empty {
                p { style: "color: #777;", "Open a CSV file to begin." }
            }

            div { style: "display: flex; gap: 6px; align-items: center; margin-top: 12px;",
                {columns.iter().map(|column| {
                    let value = new_row.value(column).to_string();
                    let placeholder = column.clone();
                    let column = column.clone();
                    rsx!(
                        input {
                            placeholder: "{placeholder}",
                            value: value,
                            oninput: move |event| {
                                store.write().update_new_row_field(&column, &event.value());
                            }
                        }
                    )
                })}
                button {
                    onclick: move |_| {
                        let id = store.write().append_new_row();
                        *status.write() = format!("Added row {id}");
                    },
                    "Add Row"
                }
            }

            div { style: "margin-top: 8px; color: #555;", "{status_text}" }
        }
    }
}
