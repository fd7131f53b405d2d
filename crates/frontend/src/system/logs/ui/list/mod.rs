use contracts::system::logs::{LogEntry, LogFilter, UserFilter};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::date_input::DateInput;
use crate::shared::config::ClientConfig;
use crate::shared::date_utils::{format_date_input, format_log_timestamp, parse_date_input, today};
use crate::shared::debounce::{debounce, Debounced};
use crate::shared::export::download_csv;
use crate::system::auth::guard::RequireAdmin;
use crate::system::logs::api;
use crate::system::logs::state::{create_state, FetchTicket, LogsAction};

#[component]
pub fn LogsPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <LogsList />
        </RequireAdmin>
    }
}

#[component]
fn LogsHeader(
    #[prop(into)] total_count: Signal<usize>,
    #[prop(into)] is_loading: Signal<bool>,
    #[prop(into)] is_exporting: Signal<bool>,
    on_refresh: Callback<()>,
    on_export: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h1 class="page__title">"Activity Logs"</h1>
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                    <span>{move || total_count.get().to_string()}</span>
                </Badge>
            </div>

            <div class="page__header-right">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| on_export.run(())
                    disabled=is_exporting
                >
                    {move || if is_exporting.get() { "Exporting..." } else { "Export CSV" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_refresh.run(())
                    disabled=is_loading
                >
                    {move || if is_loading.get() { "Loading..." } else { "Refresh" }}
                </Button>
            </div>
        </div>
    }
}

#[component]
fn LogsList() -> impl IntoView {
    let config = ClientConfig::load();
    let initial = LogFilter::trailing_window(today(), config.log_window_days);

    let state = create_state(initial.clone());

    // inputs bound to controls
    let date_from = RwSignal::new(format_date_input(initial.date_from));
    let date_to = RwSignal::new(format_date_input(initial.date_to));
    let user = RwSignal::new(initial.user.as_selection().to_string());
    let search = RwSignal::new(initial.search.clone());

    let run = move |ticket: Option<FetchTicket>| {
        let Some(ticket) = ticket else { return };
        spawn_local(async move {
            let outcome = api::fetch_logs(&ticket.query).await;
            if let Err(e) = &outcome {
                log::error!("{}", e);
            }
            let applied = state
                .try_update(|s| s.complete(ticket.seq, outcome))
                .unwrap_or(false);
            if !applied {
                log::debug!("Dropped response of superseded logs request #{}", ticket.seq);
            }
        });
    };

    let dispatch = move |action: LogsAction| {
        run(state.try_update(|s| s.apply(action)).flatten());
    };

    // Initial load
    run(state.try_update(|s| s.issue_fetch()).flatten());

    // Date range and user apply immediately
    Effect::new(move |_| {
        let from = parse_date_input(&date_from.get());
        dispatch(LogsAction::SetDateFrom(from));
    });
    Effect::new(move |_| {
        let to = parse_date_input(&date_to.get());
        dispatch(LogsAction::SetDateTo(to));
    });
    Effect::new(move |_| {
        let selected = UserFilter::from_selection(&user.get());
        dispatch(LogsAction::SetUser(selected));
    });

    // Search is applied once typing pauses
    let search_input = StoredValue::new(Debounced::<String>::skipping_first());
    Effect::new(move |_| {
        let term = search.get();
        debounce(search_input, term, config.search_debounce_ms, move |term| {
            log::debug!("Applying search term {:?}", term);
            dispatch(LogsAction::ApplySearch(term));
        });
    });
    on_cleanup(move || {
        search_input.try_update_value(|d| d.cancel());
    });

    let export = move || {
        // export what the search box shows, debounced or not
        let typed = search.get_untracked();
        let Some(start) = state.try_update(|s| s.begin_export(&typed)).flatten() else {
            return;
        };
        run(start.fetch);
        let request = start.request;
        spawn_local(async move {
            let result = match api::export_logs(&request).await {
                Ok(response) => download_csv(&response.csv_data, response.download_name())
                    .map_err(|e| format!("Failed to download export: {}", e)),
                Err(e) => Err(e.to_string()),
            };
            if let Err(e) = &result {
                log::error!("{}", e);
            }
            state.try_update(|s| s.finish_export(result));
        });
    };

    let is_inverted = Signal::derive(move || state.with(|s| s.filter.is_inverted()));

    view! {
        <div class="page page--wide">
            <LogsHeader
                total_count=Signal::derive(move || state.with(|s| s.rows.len()))
                is_loading=Signal::derive(move || state.with(|s| s.is_loading))
                is_exporting=Signal::derive(move || state.with(|s| s.is_exporting))
                on_refresh=Callback::new(move |_| dispatch(LogsAction::Refresh))
                on_export=Callback::new(move |_| export())
            />

            {move || {
                let errors = state.with(|s| {
                    s.error.iter().chain(s.export_error.iter()).cloned().collect::<Vec<_>>()
                });
                errors
                    .into_iter()
                    .map(|e| view! {
                        <div class="warning-box warning-box--error">
                            <span class="warning-box__icon">"⚠"</span>
                            <span class="warning-box__text">{e}</span>
                        </div>
                    })
                    .collect_view()
            }}

            <div class="filter-panel">
                <div class="filter-panel-content">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <DateInput label="From" value=date_from />
                        <DateInput label="To" value=date_to />

                        <div style="min-width: 200px;">
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"User:"</Label>
                                <Select value=user>
                                    <option value="">"All users"</option>
                                    <For
                                        each=move || state.with(|s| s.usernames.clone())
                                        key=|name| name.clone()
                                        children=move |name| view! { <option value=name.clone()>{name.clone()}</option> }
                                    />
                                </Select>
                            </Flex>
                        </div>

                        <div style="min-width: 320px;">
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Search:"</Label>
                                <Input value=search placeholder="Username or remarks..." />
                            </Flex>
                        </div>
                    </Flex>

                    <Show when=move || is_inverted.get()>
                        <div class="filter-panel__hint">
                            "The start date is after the end date."
                        </div>
                    </Show>
                </div>
            </div>

            <div class="page-content">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell resizable=true min_width=200.0>"Timestamp"</TableHeaderCell>
                            <TableHeaderCell resizable=true min_width=160.0>"User"</TableHeaderCell>
                            <TableHeaderCell resizable=true min_width=320.0>"Remarks"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || state.with(|s| s.rows.iter().cloned().enumerate().collect::<Vec<_>>())
                            key=|(idx, entry)| row_key(*idx, entry)
                            children=move |(_, entry)| {
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout>{format_log_timestamp(&entry.timestamp)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{entry.username.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{entry.remarks.clone()}</TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>

                {move || {
                    let (loading, empty) = state.with(|s| (s.is_loading, s.rows.is_empty()));
                    if loading && empty {
                        Some(view! { <div class="table-placeholder">"Loading logs..."</div> }.into_any())
                    } else if empty {
                        Some(view! { <div class="table-placeholder">"No logs found for the selected filters."</div> }.into_any())
                    } else {
                        None
                    }
                }}
            </div>
        </div>
    }
}

fn row_key(idx: usize, entry: &LogEntry) -> String {
    match entry.id {
        Some(id) => id.to_string(),
        None => format!("{}:{}", idx, entry.timestamp),
    }
}
