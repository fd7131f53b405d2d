use leptos::prelude::*;

/// Labelled native date picker bound to a yyyy-mm-dd signal.
/// Clearing the field stores an empty string.
#[component]
pub fn DateInput(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional)] style: Option<String>,
) -> impl IntoView {
    let default_style = "padding: 6px 8px; border: 1px solid #ced4da; border-radius: 4px; font-size: 0.875rem; background: #fff; width: 140px;";
    let final_style = style.unwrap_or_else(|| default_style.to_string());

    view! {
        <label class="date-input">
            <span class="date-input__label">{label}</span>
            <input
                type="date"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                style=final_style
            />
        </label>
    }
}
